use std::collections::HashMap;
use std::process::ExitCode;

use chrono::{SecondsFormat, Utc};
use clap::{Parser, Subcommand};
use logwire_core::config::Config;
use logwire_core::logger::{Level, Logger};
use logwire_core::model::{LogQuery, LogRecord};
use logwire_transport::{GrpcClient, LogClient, RestClient};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "logwire")]
#[command(about = "Send and query logs against a collector over gRPC or REST")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Send one sample log over gRPC")]
    GrpcSend,
    #[command(about = "Fetch logs over gRPC")]
    GrpcGet,
    #[command(about = "Send one sample log over REST")]
    RestSend,
    #[command(about = "Fetch logs over REST")]
    RestGet,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let logger = Logger::new(Level::Info);

    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            logger.error("failed to load config", Some(&e), &[]);
            return ExitCode::FAILURE;
        }
    };

    let ok = match cli.command {
        Commands::GrpcSend => match GrpcClient::connect(&cfg.grpc_endpoint) {
            Ok(client) => {
                let ok = run_send(&client, "gRPC", "Hello, log world!", &logger).await;
                client.close();
                ok
            }
            Err(e) => {
                logger.error(
                    "failed to connect to gRPC",
                    Some(&e),
                    &[("endpoint", json!(cfg.grpc_endpoint))],
                );
                false
            }
        },
        Commands::GrpcGet => match GrpcClient::connect(&cfg.grpc_endpoint) {
            Ok(client) => {
                let ok = run_get(&client, "gRPC", &cfg, &logger).await;
                client.close();
                ok
            }
            Err(e) => {
                logger.error(
                    "failed to connect to gRPC",
                    Some(&e),
                    &[("endpoint", json!(cfg.grpc_endpoint))],
                );
                false
            }
        },
        Commands::RestSend => {
            let client = RestClient::new(&cfg.rest_endpoint);
            run_send(&client, "REST", "Hello from REST!", &logger).await
        }
        Commands::RestGet => {
            let client = RestClient::new(&cfg.rest_endpoint);
            run_get(&client, "REST", &cfg, &logger).await
        }
    };

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

async fn run_send(
    client: &dyn LogClient,
    transport: &str,
    message: &str,
    logger: &Logger,
) -> bool {
    let record = sample_record(message);
    let attrs = record_attrs(&record);

    match client.send_log(&record).await {
        Ok(()) => {
            logger.info(&format!("SendLog ({transport}) succeeded"), &attrs);
            true
        }
        Err(e) => {
            logger.error(&format!("SendLog ({transport}) failed"), Some(&e), &attrs);
            false
        }
    }
}

async fn run_get(client: &dyn LogClient, transport: &str, cfg: &Config, logger: &Logger) -> bool {
    let query = LogQuery {
        service: "test-service".to_string(),
        level: "INFO".to_string(),
        limit: cfg.default_limit,
        offset: cfg.default_offset,
    };

    match client.get_logs(&query).await {
        Ok(logs) => {
            logger.info(
                &format!("GetLogs ({transport}) succeeded"),
                &[("count", json!(logs.len()))],
            );
            for log in &logs {
                logger.info(
                    "log entry",
                    &[("id", json!(log.id)), ("message", json!(log.message))],
                );
            }
            true
        }
        Err(e) => {
            logger.error(
                &format!("GetLogs ({transport}) failed"),
                Some(&e),
                &[
                    ("service", json!(query.service)),
                    ("level", json!(query.level)),
                    ("limit", json!(query.limit)),
                    ("offset", json!(query.offset)),
                ],
            );
            false
        }
    }
}

fn sample_record(message: &str) -> LogRecord {
    LogRecord {
        id: Uuid::new_v4().to_string(),
        trace_id: Uuid::new_v4().to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        level: "INFO".to_string(),
        service: "test-service".to_string(),
        message: message.to_string(),
        metadata: HashMap::from([("env".to_string(), "dev".to_string())]),
    }
}

fn record_attrs(record: &LogRecord) -> Vec<(&'static str, Value)> {
    vec![
        ("id", json!(record.id)),
        ("trace_id", json!(record.trace_id)),
        ("timestamp", json!(record.timestamp)),
        ("service", json!(record.service)),
        ("level", json!(record.level)),
        ("message", json!(record.message)),
        ("metadata", json!(record.metadata)),
    ]
}

/// Internal transport diagnostics (`RUST_LOG`-gated) go to stderr so the
/// structured outcome log on stdout stays machine-parseable.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
