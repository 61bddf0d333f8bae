use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use factura_portal::admin::{customers_table, invoices_table};
use factura_portal::{AdminPanel, HttpBackend, PortalConfig, TokenStore};

#[derive(Parser, Debug)]
#[command(name = "admin")]
#[command(about = "Consulta de facturas y clientes")]
#[command(version)]
struct Cli {
    /// Filtro: numcheque, RFC o nombre
    #[arg(long, short, global = true, default_value = "")]
    q: String,

    /// Desplazamiento de la página
    #[arg(long, global = true, default_value_t = 0)]
    offset: u32,

    /// Token para esta ejecución, sin guardarlo
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Guarda el token de administrador
    SaveToken { token: String },
    /// Busca facturas
    Invoices,
    /// Busca clientes
    Customers,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();
    factura_portal::init_logging();

    let cli = Cli::parse();
    let config = PortalConfig::load()?;

    let backend = Arc::new(HttpBackend::new(&config)?);
    let store = TokenStore::from_config(&config)?;
    let mut panel = AdminPanel::open(backend, store, config.admin_page_size).await;

    if let Some(token) = cli.token {
        panel.set_token(token);
    }
    panel.set_filter(cli.q);

    let result = run(&mut panel, cli.command, cli.offset).await;
    for notice in panel.take_notices() {
        eprintln!("{}", notice);
    }

    // Panel errors are always reported as notices.
    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run(panel: &mut AdminPanel, command: Option<Command>, offset: u32) -> Result<()> {
    match command {
        None => {
            if panel.initial_load().await? {
                print_invoices(panel);
            } else {
                tracing::info!("Sin token guardado; usa `admin save-token <TOKEN>`");
            }
        }
        Some(Command::SaveToken { token }) => {
            panel.set_token(token);
            panel.save_token().await?;
        }
        Some(Command::Invoices) => {
            panel.list_invoices(offset).await?;
            print_invoices(panel);
        }
        Some(Command::Customers) => {
            panel.list_customers(offset).await?;
            println!("{}", customers_table(panel.customers()).render());
        }
    }
    Ok(())
}

fn print_invoices(panel: &AdminPanel) {
    println!("{}", invoices_table(panel.base_url(), panel.invoices()).render());
}
