use crate::api::LunchClient;
use crate::args::ShowArgs;
use crate::cache::SnapshotCache;
use crate::commands::Out;
use crate::fetch::{Fetcher, WidgetData};
use crate::keys::KeyStore;
use crate::model::Snapshot;
use crate::render::{self, RenderContext};
use crate::{Config, Result};
use std::path::Path;

/// Runs one full render cycle and prints the widget to stdout.
pub async fn show(home: &Path, args: ShowArgs) -> Result<Out<Snapshot>> {
    let mut config = Config::init(home).await?;
    if let Some(marker) = args.pay_cycle() {
        config.set_pay_cycle(marker);
    }

    // The credential is resolved before any network activity, prompting
    // interactively on first use.
    let keys = KeyStore::new(&config);
    let credential = keys.obtain().await?;

    let api = LunchClient::new(&config, &credential);
    let cache = SnapshotCache::new(config.synced_root());
    let fetcher = Fetcher::new(&api, &cache, &config);
    let data = fetcher.snapshot(args.force_refresh()).await?;

    let ctx = RenderContext {
        window_label: window_label(&config),
    };
    let widget = render::build(args.size(), &data, &ctx);
    print!("{}", render::term::to_text(&widget));

    let message = format!("Rendered the {} widget", args.size());
    Ok(match data {
        WidgetData::Ready(snapshot) => Out::new(message, snapshot),
        WidgetData::Empty => Out::new_message(message),
    })
}

fn window_label(config: &Config) -> String {
    if config.pay_cycle_mode() {
        "Current Pay cycle".to_string()
    } else {
        // The calendar month name, e.g. "August".
        chrono::Local::now().format("%B").to_string()
    }
}
