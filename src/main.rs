use clap::Parser;
use dashkit::utils::error::ErrorSeverity;
use dashkit::utils::{logger, validation::Validate};
use dashkit::{
    ApiClient, BootstrapInitializer, CliConfig, Command, DashError, DashboardApi, Formatter,
    Result, Settings, StaticDocument, ToastQueue, WidgetRegistry,
};
use serde::Serialize;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(config: CliConfig) -> Result<()> {
    let settings = config.settings()?;
    settings.validate()?;

    match config.command {
        Command::Get { url } => print_json(&client(&settings)?.get_json(&url).await?),
        Command::Post { url, data } => {
            let body: serde_json::Value = serde_json::from_str(&data)?;
            print_json(&client(&settings)?.post_json(&url, &body).await?)
        }
        Command::Delete { url } => print_json(&client(&settings)?.delete_json(&url).await?),
        Command::Stats => {
            let stats = DashboardApi::new(client(&settings)?).stats().await?;
            println!("Total projects: {}", dashkit::format_number(stats.total_projects));
            println!("Last 7 days:    {}", dashkit::format_number(stats.recent_7days));
            for (facility, count) in &stats.facility_types {
                println!("  {:<20} {}", facility, dashkit::format_number(count));
            }
            Ok(())
        }
        Command::Health => print_json(&DashboardApi::new(client(&settings)?).health().await?),
        Command::FormatNumber { value } => {
            println!("{}", format_number_arg(&value)?);
            Ok(())
        }
        Command::FormatDate { value } => {
            println!("{}", Formatter::new(settings.format)?.format_date(&value));
            Ok(())
        }
        Command::Widgets { manifest } => {
            let document = StaticDocument::from_file(&manifest)?;
            let mut registry = WidgetRegistry::new();
            let report = BootstrapInitializer::new().on_ready(&document, &mut registry)?;
            for binding in registry.bindings() {
                println!("{:?}\t#{}", binding.kind, binding.element_id);
            }
            println!(
                "{} tooltips, {} toasts ({} elements scanned)",
                report.tooltips,
                report.toasts,
                document.len()
            );
            Ok(())
        }
        Command::Toast { message, kind } => {
            let (queue, mut receiver) = ToastQueue::channel();
            queue.show_toast(message, kind)?;
            drop(queue);
            while let Some(notification) = receiver.next().await {
                println!("[{}] {}", notification.kind.as_str(), notification.message);
            }
            Ok(())
        }
    }
}

fn client(settings: &Settings) -> Result<ApiClient<dashkit::ReqwestTransport>> {
    let client = ApiClient::http();
    match &settings.base_url {
        Some(base_url) => client.with_base_url(base_url),
        None => Ok(client),
    }
}

fn format_number_arg(value: &str) -> Result<String> {
    if let Ok(n) = value.parse::<i128>() {
        return Ok(dashkit::format_number(n));
    }
    value
        .parse::<f64>()
        .map(dashkit::format_number)
        .map_err(|_| DashError::ValidationError {
            message: format!("'{}' is not a number", value),
        })
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
