use anyhow::Result;
use prazos_models::LookupOutcome;
use prometheus::{IntCounterVec, Opts, Registry, TextEncoder};

/// Lookup counters exposed on `/metrics`.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    lookups: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new_custom(Some("prazos".to_string()), None)?;
        let lookups = IntCounterVec::new(
            Opts::new("lookups_total", "Order lookups by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(lookups.clone()))?;

        Ok(Self { registry, lookups })
    }

    pub fn record(&self, outcome: LookupOutcome) {
        self.lookups.with_label_values(&[outcome.as_str()]).inc();
    }

    pub fn encode(&self) -> String {
        TextEncoder::new()
            .encode_to_string(&self.registry.gather())
            .unwrap_or_else(|_| "Error encoding metrics".to_string())
    }
}
