pub mod client;
pub mod convert;
pub mod grpc;
pub mod rest;
pub mod time;

/// Generated protobuf types for the collector's LogService schema.
pub mod pb {
    tonic::include_proto!("logwire.logs.v1");
}

pub use client::LogClient;
pub use grpc::GrpcClient;
pub use rest::RestClient;
