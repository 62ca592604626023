use std::env;
use std::path::PathBuf;

fn main() {
    tonic_build::compile_protos("proto/health.proto").unwrap();
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Descriptor set feeds the reflection service
    let descriptor_path = out_dir.join("matcher_descriptor.bin");

    tonic_build::configure()
        .file_descriptor_set_path(descriptor_path)
        .compile_protos(&["proto/matcher.proto"], &["proto"])
        .unwrap_or_else(|e| panic!("Failed to compile proto files: {}", e));
}
