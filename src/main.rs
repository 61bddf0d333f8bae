use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use factura_portal::models::display_amount;
use factura_portal::workflow::today_utc;
use factura_portal::{
    Applied, FiscalDefaults, FiscalForm, HttpBackend, InvoiceWorkflow, PortalConfig,
    PortalError, SearchOutcome,
};

#[derive(Parser, Debug)]
#[command(name = "portal")]
#[command(about = "Solicita la factura de un consumo por fecha y numcheque")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Busca consumos por fecha y numcheque
    Lookup(LookupArgs),
    /// Busca el consumo, genera la factura y opcionalmente la descarga o envía
    Invoice(InvoiceArgs),
}

#[derive(Args, Debug)]
struct LookupArgs {
    /// Fecha del consumo (YYYY-MM-DD). La API busca por el día UTC; por defecto, hoy en UTC
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Número de cheque impreso en el ticket
    #[arg(long)]
    numcheque: String,
}

#[derive(Args, Debug)]
struct InvoiceArgs {
    #[command(flatten)]
    lookup: LookupArgs,

    /// Orden a facturar cuando la búsqueda devuelve varias
    #[arg(long)]
    order_id: Option<i64>,

    /// Razón social / nombre
    #[arg(long)]
    legal_name: String,

    /// RFC
    #[arg(long)]
    tax_id: String,

    /// Régimen fiscal, 3 caracteres (ej: 601)
    #[arg(long)]
    tax_system: Option<String>,

    #[arg(long)]
    email: Option<String>,

    /// Código postal
    #[arg(long)]
    zip: Option<String>,

    /// Uso CFDI (por defecto G03)
    #[arg(long)]
    cfdi_use: Option<String>,

    /// Forma de pago (por defecto 03)
    #[arg(long)]
    payment_form: Option<String>,

    /// Directorio donde guardar el PDF y el ZIP
    #[arg(long)]
    download: Option<PathBuf>,

    /// Envía la factura al email capturado
    #[arg(long)]
    send_email: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();
    factura_portal::init_logging();

    let cli = Cli::parse();
    let config = PortalConfig::load()?;
    tracing::debug!("API: {}", config.api_base);

    let backend = Arc::new(HttpBackend::new(&config)?);
    let mut workflow = InvoiceWorkflow::new(backend, FiscalDefaults::from(&config));

    let result = match cli.command {
        Command::Lookup(args) => lookup(&mut workflow, args).await,
        Command::Invoice(args) => invoice(&mut workflow, args, &config).await,
    };

    flush_notices(&mut workflow);
    Ok(exit_code(result))
}

fn exit_code(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !reported_as_notice(&e) {
                eprintln!("{}", e);
            }
            ExitCode::FAILURE
        }
    }
}

/// Workflow failures already reached the user through the flushed notices.
fn reported_as_notice(error: &anyhow::Error) -> bool {
    error.downcast_ref::<PortalError>().is_some()
}

async fn lookup(workflow: &mut InvoiceWorkflow, args: LookupArgs) -> Result<()> {
    let date = args.date.unwrap_or_else(today_utc);
    let outcome = workflow.search(Some(date), &args.numcheque).await;
    flush_notices(workflow);
    outcome?;

    print_orders(workflow);
    Ok(())
}

async fn invoice(workflow: &mut InvoiceWorkflow, args: InvoiceArgs, config: &PortalConfig) -> Result<()> {
    let date = args.lookup.date.unwrap_or_else(today_utc);
    let outcome = workflow.search(Some(date), &args.lookup.numcheque).await;
    flush_notices(workflow);

    match outcome? {
        Applied::Current(SearchOutcome::NoResults) => bail!("No hay orden que facturar"),
        Applied::Current(SearchOutcome::Multiple(count)) if args.order_id.is_none() => {
            print_orders(workflow);
            bail!("Se encontraron {} órdenes; indica cuál con --order-id", count);
        }
        Applied::Current(_) => {}
        Applied::Stale => bail!("La búsqueda fue reemplazada por otra"),
    }

    if let Some(id) = args.order_id {
        let selected = workflow.select_order(id);
        flush_notices(workflow);
        selected?;
    }

    if let Some(order) = workflow.selected_order() {
        println!("Orden: ID {} · Total: {}", order.id, display_amount(&order.total));
    }

    let form = FiscalForm {
        legal_name: args.legal_name,
        tax_id: args.tax_id,
        tax_system: args.tax_system.unwrap_or_else(|| config.tax_system.clone()),
        email: args.email,
        zip: args.zip,
        cfdi_use: args.cfdi_use,
        payment_form: args.payment_form,
    };

    let generated = workflow.generate_invoice(form).await;
    flush_notices(workflow);
    let review = generated?
        .current()
        .ok_or_else(|| anyhow!("La factura fue descartada por una búsqueda nueva"))?;

    println!("Factura (PDF): {}", review.pdf_url);
    if let Some(zip) = &review.zip_url {
        println!("ZIP (PDF+XML): {}", zip);
    }
    println!("{}", review.recipient_label());

    if let Some(dir) = &args.download {
        let saved = workflow.download_documents(dir).await;
        flush_notices(workflow);
        saved?;
    }

    if args.send_email {
        let sent = workflow.send_invoice_email().await;
        flush_notices(workflow);
        sent?;
    }

    Ok(())
}

fn print_orders(workflow: &InvoiceWorkflow) {
    let selected = workflow.selected_order().map(|o| o.id);
    for order in workflow.orders() {
        let marker = if Some(order.id) == selected { "*" } else { " " };
        println!("{} {}", marker, order);
        println!("    {}", order.detail_line());
    }
}

fn flush_notices(workflow: &mut InvoiceWorkflow) {
    for notice in workflow.take_notices() {
        eprintln!("{}", notice);
    }
}
