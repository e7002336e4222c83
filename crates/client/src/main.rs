//! localemgmt-client CLI entry point.

use clap::Parser;
use localemgmt_client::cli::health::HealthAction;
use localemgmt_client::cli::items::ItemsAction;
use localemgmt_client::cli::{Cli, Commands};
use localemgmt_client::client::items::{read_items_file, ItemsQuery};
use localemgmt_client::output::{pretty, render};
use localemgmt_client::{ClientError, LocaleClient};
use localemgmt_core::locale::LocaleItem;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = LocaleClient::new(&cli.base_url).with_session(cli.session.clone());

    match cli.command {
        Commands::Items(items_cmd) => match items_cmd.action {
            ItemsAction::List { filter } => {
                let items = match client.list_items(&ItemsQuery::from(filter)).await {
                    Ok(items) => items,
                    // The server answers an empty result with 404
                    Err(ClientError::NotFound { .. }) => Vec::new(),
                    Err(e) => return Err(e.into()),
                };
                println!("{}", render(&items, cli.format, |i| pretty::format_items(i)));
            }
            ItemsAction::Upsert {
                key,
                bundle,
                lang,
                content,
            } => {
                let item = client
                    .upsert_item(&LocaleItem::new(key, bundle, lang, content))
                    .await?;
                println!(
                    "{}",
                    render(&item, cli.format, |i| format!("Saved:\n{}", pretty::format_item(i)))
                );
            }
            ItemsAction::Import { file } => {
                let items = read_items_file(&file)?;
                if !cli.quiet {
                    eprintln!("Importing {} items from {}", items.len(), file.display());
                }
                let report = client.upsert_items(&items).await?;
                println!("{}", render(&report, cli.format, pretty::format_report));
            }
            ItemsAction::Delete { filter, all } => {
                let deleted = client.delete_items(&ItemsQuery::from(filter), all).await?;
                println!(
                    "{}",
                    render(&deleted, cli.format, |d| format!("Deleted {} items", d.deleted))
                );
            }
        },
        Commands::Langs => {
            let langs = client.list_langs().await?;
            println!(
                "{}",
                render(&langs, cli.format, |l| pretty::format_names("LANGS", l))
            );
        }
        Commands::Bundles => {
            let bundles = client.list_bundles().await?;
            println!(
                "{}",
                render(&bundles, cli.format, |b| pretty::format_names("BUNDLES", b))
            );
        }
        Commands::Version => {
            let info = client.version().await?;
            println!("{}", render(&info, cli.format, pretty::format_version));
        }
        Commands::Health(health_cmd) => match health_cmd.action {
            HealthAction::Live => {
                let live = client.livez().await?;
                if !cli.quiet {
                    println!("{}", if live { "Live" } else { "Not live" });
                }
                if !live {
                    std::process::exit(1);
                }
            }
            HealthAction::Ready => {
                let readiness = client.readyz().await?;
                println!("{}", render(&readiness, cli.format, pretty::format_readiness));
                if !readiness.ready {
                    std::process::exit(1);
                }
            }
        },
    }

    Ok(())
}
