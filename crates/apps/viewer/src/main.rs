use clap::Parser;
use client::{ClientConfig, FloodClient};
use runtime::SelectionBus;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use viewer::{App, MapInput, MapView, ViewerConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless flood event viewer driven from stdin")]
struct Args {
    /// Backend root URL (default: FLOOD_API_URL or http://localhost:8000)
    #[arg(long)]
    api_url: Option<String>,

    /// Viewport width in pixels
    #[arg(long)]
    width: Option<f64>,

    /// Viewport height in pixels
    #[arg(long)]
    height: Option<f64>,
}

/// One stdin line. Lines starting with `:` are map commands, anything else is
/// typed into the region picker.
#[derive(Debug, PartialEq)]
enum Command<'a> {
    Type(&'a str),
    Input(MapInput),
    Quit,
    Unknown(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let Some(rest) = line.strip_prefix(':') else {
        return Command::Type(line);
    };
    let mut parts = rest.split_whitespace();
    let verb = parts.next().unwrap_or_default();
    let pixel = match (
        parts.next().and_then(|v| v.parse::<f64>().ok()),
        parts.next().and_then(|v| v.parse::<f64>().ok()),
    ) {
        (Some(x), Some(y)) => Some([x, y]),
        _ => None,
    };
    match (verb, pixel) {
        ("click", Some(pixel)) => Command::Input(MapInput::Click { pixel }),
        ("move", Some(pixel)) => Command::Input(MapInput::PointerMove { pixel }),
        ("quit", _) => Command::Quit,
        _ => Command::Unknown(line),
    }
}

fn report(view: &MapView) {
    info!(
        selected = ?view.selected_region(),
        markers = view.markers().len(),
        outline = view.region_layer().is_some(),
        layers = view.map().len(),
        zoom = view.map().view().zoom(),
        status = ?view.status(),
        "map state"
    );
    for overlay in view.overlay_summary() {
        debug!(
            layer = overlay.layer.0,
            points = overlay.points,
            lines = overlay.lines,
            triangles = overlay.triangles,
            "overlay"
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = ViewerConfig::from_env();
    if let Some(url) = args.api_url {
        config.client = ClientConfig::new(url).with_timeout(config.client.timeout);
    }
    if let Some(width) = args.width {
        config.map_size[0] = width;
    }
    if let Some(height) = args.height {
        config.map_size[1] = height;
    }
    info!(api = %config.client.base_url, "starting flood viewer");

    let client = FloodClient::from_config(config.client.clone())?;
    let mut app = App::new(client.clone(), SelectionBus::default());
    let mut view = MapView::new(client, &config);
    view.start();
    view.settle().await;
    report(&view);

    if let Err(e) = app.load_options().await {
        warn!("region options unavailable: {e}");
    }

    let (input_tx, input_rx) = mpsc::channel(32);
    let view_task = tokio::spawn(view.run(app.bus().subscribe(), input_rx));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(line.trim_end()) {
            Command::Type(text) => {
                let update = app.type_text(text);
                info!(
                    exact_match = ?update.exact_match,
                    suggestions = ?update.suggestions,
                    "region picker"
                );
            }
            Command::Input(input) => input_tx.send(input).await?,
            Command::Quit => break,
            Command::Unknown(line) => warn!(%line, "unknown command; try :click x y, :move x y or :quit"),
        }
    }

    drop(input_tx);
    let mut view = view_task.await?;
    view.settle().await;
    report(&view);
    Ok(())
}
