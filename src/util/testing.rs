//! Test support: tracing setup and a reference hotel.

use std::env;
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "hva=trace");
        }
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // config's env source is chatty at trace level
    let noisy_modules = ["config"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// A small but complete hotel in import format.
///
/// Two habitats, three species, one vet for S1 and S2, a caretaker for H1
/// and one vaccine meant for S1 only.
pub const SAMPLE_IMPORT: &str = "\
ESPÉCIE|S1|Leão
ESPÉCIE|S2|Leoa
ESPÉCIE|S3|Pinguim
ÁRVORE|T1|Carvalho|5|2|CADUCA
ÁRVORE|T2|Pinheiro|3|1|PERENE
HABITAT|H1|Savana|100|T1,T2
HABITAT|H2|Gelo|20
ANIMAL|A1|Simba|S1|H1
ANIMAL|A2|Nala|S2|H1
ANIMAL|A3|Pingu|S3|H2
VETERINÁRIO|V1|Rita|S1,S2
TRATADOR|C1|Rui|H1
VACINA|VAC1|Rabies|S1
";
