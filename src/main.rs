//! CLI entry point for widget-events
//!
//! Inspects the event namespace and selector grammar, and simulates a
//! native event against an in-memory node to show which subscriptions fire.

use clap::{Parser, Subcommand};
use colored::*;
use std::cell::RefCell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;
use widget_events::core::logical_names_for;
use widget_events::dom::{GenericEvent, KeyboardEvent, MemoryTarget, MouseEvent, NativeEvent};
use widget_events::{
    compile, list_actions, list_categories, normalize_selector, resolve_native_event_name,
    EmitterConfig, EventSource, Listener, WidgetEvents,
};

#[derive(Parser)]
#[command(name = "widget-events")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log emitter internals (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List event categories
    Categories,

    /// List the actions of one category
    Actions {
        /// Category name, e.g. `mouse`
        category: String,
    },

    /// Print the native event behind a category and action
    Resolve {
        category: String,
        action: String,
    },

    /// Print the normalised form of a modifier selector
    Normalize {
        /// Modifier selector, e.g. `Space+Ctrl`
        selector: String,
    },

    /// Compile an event selector and print its subscription key
    Compile {
        /// Event selector, e.g. `key:press:ctrl+space`
        selector: String,

        /// Build the capture-phase key
        #[arg(long)]
        capture: bool,
    },

    /// Subscribe to a selector and fire one synthetic native event
    Simulate {
        /// Event selector to subscribe to
        selector: String,

        /// Native event to fire (defaults to the selector's native event)
        #[arg(short, long)]
        event: Option<String>,

        /// Keyboard code, e.g. `Space` or `KeyD`
        #[arg(long, conflicts_with = "button")]
        code: Option<String>,

        /// Mouse button index
        #[arg(long)]
        button: Option<i16>,

        #[arg(long)]
        alt: bool,

        #[arg(long)]
        ctrl: bool,

        #[arg(long)]
        shift: bool,

        #[arg(long)]
        meta: bool,

        /// Subscribe in the capture phase
        #[arg(long)]
        capture: bool,

        /// Leak-warning threshold per subscription key (0 disables)
        #[arg(long, default_value_t = widget_events::config::DEFAULT_MAX_LISTENERS)]
        max_listeners: usize,
    },
}

/// Modifier flags of a synthetic event
struct Modifiers {
    alt: bool,
    ctrl: bool,
    shift: bool,
    meta: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Categories => show_categories(),
        Commands::Actions { category } => show_actions(&category)?,
        Commands::Resolve { category, action } => resolve(&category, &action)?,
        Commands::Normalize { selector } => {
            println!("{}", normalize_selector(&selector)?.green());
        }
        Commands::Compile { selector, capture } => show_compiled(&selector, capture)?,
        Commands::Simulate {
            selector,
            event,
            code,
            button,
            alt,
            ctrl,
            shift,
            meta,
            capture,
            max_listeners,
        } => {
            let modifiers = Modifiers { alt, ctrl, shift, meta };
            let config = EmitterConfig::default().with_max_listeners(max_listeners);
            simulate(&selector, event, code, button, modifiers, capture, config)?;
        }
    }

    Ok(())
}

/// Install the log subscriber; `RUST_LOG` wins over `-v`
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn show_categories() {
    for category in list_categories() {
        println!("{}", category.cyan().bold());
    }
}

fn show_actions(category: &str) -> anyhow::Result<()> {
    let actions = list_actions(category);
    if actions.is_empty() {
        anyhow::bail!("Unknown category: {}", category);
    }

    for name in actions {
        let action = name.split(':').nth(1).unwrap_or_default();
        let native = resolve_native_event_name(category, action).unwrap_or_default();
        println!("{} → {}", name.cyan(), native.green());
    }
    Ok(())
}

fn resolve(category: &str, action: &str) -> anyhow::Result<()> {
    let native = resolve_native_event_name(category, action)
        .ok_or_else(|| anyhow::anyhow!("No native event for {}:{}", category, action))?;
    println!("{}", native.green());
    Ok(())
}

fn show_compiled(selector: &str, capture: bool) -> anyhow::Result<()> {
    let compiled = compile(selector)?;

    println!("{} {}", "category:".dimmed(), compiled.category().cyan());
    println!("{} {}", "action:  ".dimmed(), compiled.action().unwrap_or("-"));
    println!(
        "{} {}",
        "modifier:".dimmed(),
        compiled.modifier_selector().unwrap_or("-").magenta()
    );
    match compiled.source() {
        EventSource::Native(native) => println!("{} {}", "native:  ".dimmed(), native.green()),
        EventSource::Logical => println!("{} {}", "native:  ".dimmed(), "logical".yellow()),
    }
    println!("{} {}", "key:     ".dimmed(), compiled.to_key(capture).bold());
    Ok(())
}

fn simulate(
    selector: &str,
    event: Option<String>,
    code: Option<String>,
    button: Option<i16>,
    modifiers: Modifiers,
    capture: bool,
    config: EmitterConfig,
) -> anyhow::Result<()> {
    let compiled = compile(selector)?;
    let event_type = match (event, compiled.native_event()) {
        (Some(event), _) => event,
        (None, Some(native)) => native.to_string(),
        (None, None) => anyhow::bail!("{} is a logical event; pass --event", selector),
    };

    let target = Rc::new(MemoryTarget::new());
    let events = WidgetEvents::with_config(target.clone(), config)?;

    let fired = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&fired);
    let handler = Listener::new(move |args| {
        let shape = args
            .first()
            .and_then(|arg| arg.as_native())
            .map(|event| format!("{:?}", event))
            .unwrap_or_default();
        sink.borrow_mut().push(shape);
    });
    events.subscribe(selector, &handler, capture)?;

    let native = build_event(&event_type, code, button, &modifiers);
    println!("{} {}", "→".cyan(), format!("{:?}", native).dimmed());
    for (category, action) in logical_names_for(&event_type) {
        println!("  {} {}:{}", "feeds".dimmed(), category, action);
    }

    target.dispatch_rc(native);

    let fired = fired.borrow();
    if fired.is_empty() {
        println!("{} {} did not fire", "✗".red().bold(), selector.bold());
        std::process::exit(1);
    }
    println!("{} {} fired {} time(s)", "✓".green().bold(), selector.bold(), fired.len());
    for shape in fired.iter() {
        println!("  {} {}", "with".dimmed(), shape);
    }
    Ok(())
}

/// Keyboard event when a code is given, mouse event for a button, plain otherwise
fn build_event(
    event_type: &str,
    code: Option<String>,
    button: Option<i16>,
    modifiers: &Modifiers,
) -> Rc<dyn NativeEvent> {
    if let Some(code) = code {
        return Rc::new(
            KeyboardEvent::new(event_type, &code)
                .with_alt(modifiers.alt)
                .with_ctrl(modifiers.ctrl)
                .with_shift(modifiers.shift)
                .with_meta(modifiers.meta),
        );
    }
    if let Some(button) = button {
        return Rc::new(
            MouseEvent::new(event_type, button)
                .with_alt(modifiers.alt)
                .with_ctrl(modifiers.ctrl)
                .with_shift(modifiers.shift)
                .with_meta(modifiers.meta),
        );
    }
    Rc::new(GenericEvent::new(event_type))
}
