use std::sync::Arc;

use alert::{DriverMonitor, MonitorPhase};
use anyhow::{Context, Result};
use clap::Parser;
use dispatch::DispatchContext;
use shared::{
    domain::{AccidentId, AccidentRecord, UnitId},
    event::AccidentEvent,
};
use store::AccidentStore;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing::debug;

mod config;
mod views;

use config::load_settings;

#[derive(Parser, Debug)]
struct Args {
    /// JSON file of accident records replacing the built-in seed
    #[arg(long)]
    seed: Option<String>,
    /// Seconds the SOS countdown runs before the alert fires
    #[arg(long)]
    countdown_seconds: Option<u32>,
}

/// Which view is on screen. Navigation carries the accident id as an opaque
/// key; existence is checked by the operation layer, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Dashboard,
    AccidentDetails(AccidentId),
    DispatchUnit(AccidentId),
}

enum Flow {
    Continue,
    Quit,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(seed) = args.seed {
        settings.seed_path = Some(seed);
    }
    if let Some(seconds) = args.countdown_seconds {
        settings.countdown_seconds = seconds;
    }

    let seed = load_seed(settings.seed_path.as_deref())?;
    let store = Arc::new(AccidentStore::new(seed)?);
    let ctx = DispatchContext::with_default_units(Arc::clone(&store));
    let mut monitor = DriverMonitor::new(settings.countdown_seconds);

    spawn_event_printer(&store, settings.bell_on_events);

    let mut route = Route::Dashboard;
    show_route(route, &ctx).await;
    println!("(help for commands)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            maybe_line = lines.next_line() => {
                let Some(line) = maybe_line.context("failed to read input")? else {
                    break;
                };
                match handle_command(line.trim(), &mut route, &ctx, &mut monitor).await {
                    Flow::Continue => {}
                    Flow::Quit => break,
                }
            }
            notice = monitor.wait_for_alert(), if monitor.is_counting() => {
                if let Some(notice) = notice {
                    println!(
                        "Emergency alert sent at {}. Police and emergency services have been notified.",
                        notice.raised_at.format("%H:%M:%S")
                    );
                }
            }
        }
    }

    Ok(())
}

fn load_seed(path: Option<&str>) -> Result<Vec<AccidentRecord>> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read seed file '{path}'"))?;
            let records: Vec<AccidentRecord> = serde_json::from_str(&raw)
                .with_context(|| format!("seed file '{path}' is not a valid accident list"))?;
            Ok(records)
        }
        None => Ok(store::demo_accidents()),
    }
}

/// Stands in for every other mounted consumer: prints a notification line
/// whenever the store broadcasts a change.
fn spawn_event_printer(store: &Arc<AccidentStore>, bell: bool) {
    let mut events = store.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if let Ok(payload) = serde_json::to_string(&event) {
                        debug!(%payload, "store event");
                    }
                    if bell {
                        print!("\x07");
                    }
                    match event {
                        AccidentEvent::AccidentUpdated { accident } => {
                            println!(
                                "[update] accident {} is now '{}'",
                                accident.id, accident.status
                            );
                        }
                        AccidentEvent::UnitDispatched { outcome } => {
                            println!(
                                "[update] {} dispatched to accident {}",
                                outcome.unit_name, outcome.accident_id
                            );
                        }
                    }
                }
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    });
}

async fn show_route(route: Route, ctx: &DispatchContext) {
    match route {
        Route::Dashboard => {
            let stats = dispatch::dashboard_stats(ctx).await;
            let accidents = dispatch::list_accidents(ctx).await;
            println!("{}", views::render_dashboard(stats, accidents.as_slice()));
        }
        Route::AccidentDetails(id) => match dispatch::accident_details(ctx, id).await {
            Ok(accident) => {
                let outcome = dispatch::latest_outcome_for(ctx, id).await;
                println!("{}", views::render_details(&accident, outcome.as_ref()));
            }
            Err(err) => println!("error: {err}"),
        },
        Route::DispatchUnit(_) => {
            println!("{}", views::render_units(dispatch::available_units(ctx)));
        }
    }
}

async fn handle_command(
    line: &str,
    route: &mut Route,
    ctx: &DispatchContext,
    monitor: &mut DriverMonitor,
) -> Flow {
    let mut tokens = line.split_whitespace();
    let Some(command) = tokens.next() else {
        return Flow::Continue;
    };
    let argument = tokens.next();

    match command {
        "help" => print_help(),
        "list" | "dashboard" => {
            *route = Route::Dashboard;
            show_route(*route, ctx).await;
        }
        "open" => match parse_id(argument) {
            Some(id) => {
                let id = AccidentId(id);
                match dispatch::accident_details(ctx, id).await {
                    Ok(_) => {
                        *route = Route::AccidentDetails(id);
                        show_route(*route, ctx).await;
                    }
                    Err(err) => println!("error: {err}"),
                }
            }
            None => println!("usage: open <accident id>"),
        },
        "inform" => match target_accident(*route, argument) {
            Some(id) => match dispatch::mark_unit_informed(ctx, id).await {
                Ok(accident) => {
                    println!("Status updated to '{}'.", accident.status);
                    show_route(*route, ctx).await;
                }
                Err(err) => println!("error: {err}"),
            },
            None => println!("usage: inform <accident id> (or open one first)"),
        },
        "resolve" => match target_accident(*route, argument) {
            Some(id) => match dispatch::resolve_accident(ctx, id).await {
                Ok(accident) => {
                    println!("Status updated to '{}'.", accident.status);
                    show_route(*route, ctx).await;
                }
                Err(err) => println!("error: {err}"),
            },
            None => println!("usage: resolve <accident id> (or open one first)"),
        },
        "units" => match *route {
            Route::AccidentDetails(id) | Route::DispatchUnit(id) => {
                *route = Route::DispatchUnit(id);
                show_route(*route, ctx).await;
            }
            Route::Dashboard => println!("open an accident first"),
        },
        "dispatch" => match (*route, parse_id(argument)) {
            (Route::DispatchUnit(accident_id), Some(unit)) => {
                match dispatch::dispatch_unit(ctx, accident_id, UnitId(unit)).await {
                    Ok(outcome) => {
                        println!(
                            "{} has been dispatched to the accident location.",
                            outcome.unit_name
                        );
                        // dispatching navigates back to the detail view
                        *route = Route::AccidentDetails(accident_id);
                        show_route(*route, ctx).await;
                    }
                    Err(err) => println!("error: {err}"),
                }
            }
            (Route::DispatchUnit(_), None) => println!("usage: dispatch <unit id>"),
            _ => println!("open an accident and its unit list first"),
        },
        "back" => {
            match *route {
                Route::DispatchUnit(id) => *route = Route::AccidentDetails(id),
                Route::AccidentDetails(_) => *route = Route::Dashboard,
                Route::Dashboard => {}
            }
            show_route(*route, ctx).await;
        }
        "sos" => {
            if monitor.detect() {
                println!(
                    "Accident detected. Emergency alert in {} seconds ('cancel' to abort).",
                    monitor.countdown_remaining().unwrap_or(0)
                );
            } else if monitor.phase() == MonitorPhase::AccidentDetected {
                println!("Alert countdown already running.");
            } else {
                // a sent alert must be acknowledged before re-arming
                monitor.reset();
                if monitor.detect() {
                    println!(
                        "Accident detected. Emergency alert in {} seconds ('cancel' to abort).",
                        monitor.countdown_remaining().unwrap_or(0)
                    );
                }
            }
        }
        "cancel" => {
            if monitor.cancel_alert() {
                println!("Emergency alert was cancelled.");
            } else {
                println!("No alert countdown running.");
            }
        }
        "quit" | "exit" => return Flow::Quit,
        other => println!("unknown command '{other}' (help for commands)"),
    }

    Flow::Continue
}

fn print_help() {
    println!(
        "commands:\n  \
         list                show the accident dashboard\n  \
         open <id>           open an accident's details\n  \
         inform [id]         mark the unit informed\n  \
         resolve [id]        resolve the accident\n  \
         units               list units for the open accident\n  \
         dispatch <unit id>  dispatch a unit and return to details\n  \
         back                go back one view\n  \
         sos                 arm the driver-side alert countdown\n  \
         cancel              cancel a running alert countdown\n  \
         quit                exit"
    );
}

fn parse_id(token: Option<&str>) -> Option<i64> {
    token.and_then(|raw| raw.parse().ok())
}

fn target_accident(route: Route, argument: Option<&str>) -> Option<AccidentId> {
    if let Some(id) = parse_id(argument) {
        return Some(AccidentId(id));
    }
    match route {
        Route::AccidentDetails(id) | Route::DispatchUnit(id) => Some(id),
        Route::Dashboard => None,
    }
}
