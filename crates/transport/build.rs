fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Server stubs are generated too; the integration tests stand up an
    // in-process LogService to exercise the client against.
    tonic_build::configure()
        .build_client(true)
        .build_server(true)
        .compile_protos(&["proto/logs.proto"], &["proto"])?;
    Ok(())
}
