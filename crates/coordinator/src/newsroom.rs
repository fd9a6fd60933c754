//! Wires configuration into a ready-to-run reasoner and session factory.

use std::sync::Arc;

use newsdesk_agents::{Delegate, NewsScoutAgent, WriterAgent};
use newsdesk_common::Result;
use newsdesk_llm::build_llm_client;
use tracing::info;

use crate::classify::SolicitationMarkers;
use crate::config::NewsdeskConfig;
use crate::manager::ManagerAgent;
use crate::reasoner::Reasoner;
use crate::session::Session;

/// Shared pieces every session is built from. Cheap to clone.
#[derive(Clone)]
pub struct Newsroom {
    reasoner: Arc<dyn Reasoner>,
    markers: SolicitationMarkers,
}

impl Newsroom {
    pub fn new(reasoner: Arc<dyn Reasoner>, markers: SolicitationMarkers) -> Self {
        Self { reasoner, markers }
    }

    /// Build the manager, scout and writer from configuration.
    pub fn from_config(config: &NewsdeskConfig) -> Result<Self> {
        let llm = build_llm_client(&config.llm)?;
        let adapter = Arc::new(config.lookup.build_adapter()?);

        let scout: Arc<dyn Delegate> = Arc::new(
            NewsScoutAgent::new(adapter).with_max_candidates(config.workflow.max_candidates),
        );
        let writer: Arc<dyn Delegate> = Arc::new(WriterAgent::with_default_config(llm.clone()));

        let manager = ManagerAgent::new(llm, scout, writer)
            .with_publication(&config.workflow.publication)
            .with_max_tool_calls(config.workflow.max_tool_calls)
            .with_temperature(config.llm.temperature);

        info!(
            model = %config.llm.model,
            publication = %config.workflow.publication,
            "Newsroom ready"
        );

        Ok(Self::new(
            Arc::new(manager),
            SolicitationMarkers::new(&config.workflow.solicitation_markers),
        ))
    }

    /// A fresh session with its own conversation.
    pub fn session(&self) -> Session {
        Session::new(self.reasoner.clone(), self.markers.clone())
    }
}
