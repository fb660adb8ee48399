fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Supply a protoc binary when one isn't on PATH (vendored via build-dep).
    if std::env::var_os("PROTOC").is_none() {
        if let Ok(path) = protoc_bin_vendored::protoc_bin_path() {
            // SAFETY: single-threaded build script, set before compile_protos.
            unsafe {
                std::env::set_var("PROTOC", path);
            }
        }
    }
    println!("cargo:rerun-if-changed=../../proto/mpgate/v1/mpgate.proto");
    tonic_build::configure()
        .build_client(false)
        .compile_protos(&["../../proto/mpgate/v1/mpgate.proto"], &["../../proto"])?;
    Ok(())
}
