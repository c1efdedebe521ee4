use crate::graph::{DEFAULT_GRAPH_BASE, DEFAULT_LOGIN_BASE, GraphCredentials, GraphEndpoints};
use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;

const DEFAULT_HTTP_BIND: &str = "127.0.0.1:8080";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub http_bind_address: SocketAddr,
    pub credentials: GraphCredentials,
    pub endpoints: GraphEndpoints,
}

impl ServerConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            http_bind,
            tenant_id,
            client_id,
            client_secret,
            graph_base,
            login_base,
        } = args;

        let http_bind_address = http_bind.unwrap_or_else(|| {
            DEFAULT_HTTP_BIND
                .parse()
                .expect("default bind address valid")
        });

        anyhow::ensure!(!tenant_id.trim().is_empty(), "tenant id must not be empty");
        anyhow::ensure!(!client_id.trim().is_empty(), "client id must not be empty");

        Ok(Self {
            http_bind_address,
            credentials: GraphCredentials {
                tenant_id,
                client_id,
                client_secret,
            },
            endpoints: GraphEndpoints {
                graph_base: graph_base.trim_end_matches('/').to_string(),
                login_base: login_base.trim_end_matches('/').to_string(),
            },
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "sheet-relay",
    about = "Formula-aware spreadsheet range copy service",
    version
)]
pub struct CliArgs {
    #[arg(
        long,
        env = "SHEET_RELAY_HTTP_BIND",
        value_name = "ADDR",
        help = "HTTP bind address (default: 127.0.0.1:8080)"
    )]
    pub http_bind: Option<SocketAddr>,

    #[arg(
        long,
        env = "TENANT_ID",
        value_name = "ID",
        help = "Azure AD tenant id"
    )]
    pub tenant_id: String,

    #[arg(
        long,
        env = "CLIENT_ID",
        value_name = "ID",
        help = "Azure AD application (client) id"
    )]
    pub client_id: String,

    #[arg(
        long,
        env = "CLIENT_SECRET",
        value_name = "SECRET",
        hide_env_values = true,
        help = "Azure AD client secret"
    )]
    pub client_secret: String,

    #[arg(
        long,
        env = "SHEET_RELAY_GRAPH_BASE",
        value_name = "URL",
        default_value = DEFAULT_GRAPH_BASE,
        help = "Microsoft Graph API base URL"
    )]
    pub graph_base: String,

    #[arg(
        long,
        env = "SHEET_RELAY_LOGIN_BASE",
        value_name = "URL",
        default_value = DEFAULT_LOGIN_BASE,
        help = "Azure AD login base URL"
    )]
    pub login_base: String,
}
