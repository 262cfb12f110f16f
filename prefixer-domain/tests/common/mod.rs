#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use prefixer_descriptor::{DescriptorRecord, decode, encode};
use prefixer_domain::MemorySourceStore;
use prefixer_edit::{Extraction, extract, format_rows};

/// A minimal protoc-gen-go style file embedding a descriptor for `name`.
pub fn generated_file(name: &str, deps: &[&str]) -> String {
    let record = DescriptorRecord::new(name, deps.iter().map(|d| d.to_string()).collect());
    let payload = encode(&record).expect("encode");
    let ident = name.replace(['/', '.', '-'], "_");

    let mut out = String::new();
    out.push_str("// Code generated by protoc-gen-go. DO NOT EDIT.\n");
    out.push_str(&format!("// source: {name}\n\n"));
    out.push_str("package gen\n\n");
    out.push_str(&format!("var File_{ident} protoreflect.FileDescriptor\n\n"));
    out.push_str(&format!("var file_{}_rawDesc = []byte{{\n", ident.to_lowercase()));
    for row in format_rows(&payload) {
        out.push_str(&row);
        out.push('\n');
    }
    out.push_str("}\n\nfunc init() {}\n");
    out
}

pub fn grpc_file(metadata: &str) -> String {
    format!(
        "package gen\n\nvar Svc_ServiceDesc = grpc.ServiceDesc{{\n\tServiceName: \"gen.Svc\",\n\tMetadata:    \"{metadata}\",\n}}\n"
    )
}

/// Decoded descriptor currently embedded in `path`.
pub fn embedded(store: &MemorySourceStore, path: &str) -> DescriptorRecord {
    let text = store.get(Utf8Path::new(path)).expect("file present");
    match extract(&text).expect("extract") {
        Extraction::Target(r) => decode(&r.payload).expect("decode"),
        other => panic!("{path}: expected target, got {other:?}"),
    }
}

pub fn paths(names: &[&str]) -> Vec<Utf8PathBuf> {
    names.iter().map(Utf8PathBuf::from).collect()
}
