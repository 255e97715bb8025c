fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto/analysis.proto");
    // Supply a protoc binary when one is not already available on the host.
    if std::env::var_os("PROTOC").is_none() {
        if let Ok(protoc) = protoc_bin_vendored::protoc_bin_path() {
            std::env::set_var("PROTOC", protoc);
        }
    }
    tonic_build::configure()
        .build_server(true)
        .build_client(true) // Client stubs are useful for integration tests and tooling
        .compile(
            &["proto/analysis.proto"], // Path relative to the engine crate root
            &["proto"],
        )?;
    Ok(())
}
