// SPDX-License-Identifier: MPL-2.0
//! Terminal storefront simulation.
//!
//! Clicks "add to cart" a few times and renders the snackbar stack and the
//! cart badge every time they change, driving timers from a tokio event loop.

use cart_snackbar::cart::{add_to_cart, CartTotal, Product};
use cart_snackbar::clock::SystemClock;
use cart_snackbar::config;
use cart_snackbar::context::Session;
use cart_snackbar::diagnostics::DiagnosticsCollector;
use cart_snackbar::error::{Error, Result};
use cart_snackbar::notifications::{NotificationChannel, Severity};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

struct Options {
    config: Option<PathBuf>,
    adds: u32,
    interval_ms: u64,
    animation_ms: u64,
    report: bool,
}

impl Options {
    fn parse() -> Result<Self> {
        let mut args = pico_args::Arguments::from_env();
        let invalid = |err: pico_args::Error| Error::Config(err.to_string());

        Ok(Self {
            report: args.contains("--report"),
            config: args.opt_value_from_str("--config").map_err(invalid)?,
            adds: args.opt_value_from_str("--adds").map_err(invalid)?.unwrap_or(5),
            interval_ms: args
                .opt_value_from_str("--interval-ms")
                .map_err(invalid)?
                .unwrap_or(400),
            animation_ms: args
                .opt_value_from_str("--animation-ms")
                .map_err(invalid)?
                .unwrap_or(450),
        })
    }
}

/// Products that cannot be added; clicking them reports an error instead.
const SOLD_OUT: &[&str] = &["p-3"];

fn catalog() -> Vec<Product> {
    vec![
        Product::new("p-1", "Nike Air Force 1 NDESTRUKT"),
        Product::new("p-2", "Foundations Matte Flip Flop"),
        Product::new("p-3", "Nike Air Zoom Pegasus 37 A.I.R. Chaz Bear"),
        Product::new("p-4", "Nike Blazer Low 77 Vintage"),
    ]
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn click(session: &mut Session, product: &Product) -> Result<()> {
    if SOLD_OUT.contains(&product.id.as_str()) {
        session
            .notifications_mut()?
            .publish(format!("\"{}\" is sold out", product.name), Severity::Error);
        return Ok(());
    }
    add_to_cart(session, product)?;
    Ok(())
}

fn render(session: &Session) -> Result<String> {
    let channel = session.notifications()?;
    let badge = session.cart()?.total_items();
    let mut frame = format!(
        "[cart: {badge}]{}",
        if channel.is_pulsing() { " *pulse*" } else { "" }
    );
    for notification in &channel.notifications() {
        frame.push_str(&format!(
            "\n  {} [{}] {}",
            notification.id(),
            notification.severity(),
            notification.message()
        ));
    }
    Ok(frame)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .with_colors(true)
        .with_local_timestamps()
        .init()
        .map_err(|err| Error::Config(err.to_string()))?;

    let options = Options::parse()?;
    let config = match &options.config {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };

    let mut collector = DiagnosticsCollector::new(config.diagnostics_capacity());
    let mut channel = NotificationChannel::with_clock((&config).into(), SystemClock);
    channel.set_diagnostics(collector.handle());
    let mut session = Session::new(channel, CartTotal::new());

    let products = catalog();
    let animation = Duration::from_millis(options.animation_ms);
    let mut clicks = tokio::time::interval(Duration::from_millis(options.interval_ms.max(1)));
    let mut clicked = 0u32;
    let mut animation_end: Option<Instant> = None;
    let mut last_frame = String::new();

    loop {
        if clicked >= options.adds && session.notifications()?.is_idle() {
            break;
        }

        let next_timer = session
            .notifications()?
            .next_deadline()
            .map(Instant::from_std);

        tokio::select! {
            _ = clicks.tick(), if clicked < options.adds => {
                let product = &products[clicked as usize % products.len()];
                clicked += 1;
                click(&mut session, product)?;
                if session.notifications()?.is_pulsing() {
                    animation_end = Some(Instant::now() + animation);
                }
            }
            () = sleep_until_opt(next_timer) => {
                session.notifications_mut()?.tick();
            }
            () = sleep_until_opt(animation_end) => {
                animation_end = None;
                session.notifications_mut()?.on_animation_finished();
            }
        }

        let frame = render(&session)?;
        if frame != last_frame {
            println!("{frame}");
            last_frame = frame;
        }
        collector.process_pending();
    }

    let report = collector.build_report(std::time::Instant::now());
    log::info!(
        "Session finished: {} events, {} notifications evicted unseen",
        report.metadata.event_count,
        report.summary.evicted_count
    );
    if options.report {
        let json = report.to_json().map_err(|err| Error::Io(err.to_string()))?;
        println!("{json}");
    }
    Ok(())
}
