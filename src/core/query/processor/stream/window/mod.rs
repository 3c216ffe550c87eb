// SPDX-License-Identifier: MIT OR Apache-2.0

// src/core/query/processor/stream/window/mod.rs

use crate::core::config::stream_config::FlatConfig;
use crate::core::config::window_config::{ExternalTimeWindowConfig, WINDOW_TYPE_KEY};
use crate::core::event::state::StateEvent;
use crate::core::event::stream::{StreamEvent, StreamEventCloner};
use crate::core::event::value::AttributeValue;
use crate::core::exception::{EventFluxError, EventFluxResult};
use crate::core::executor::{
    ConstantExpressionExecutor, ExpressionExecutor, VariableExpressionExecutor,
};
use crate::core::persistence::state_holder::StateError;
use crate::core::persistence::StateBundle;
use crate::core::query::processor::Processor;
use crate::core::util::collection::{CompiledCondition, MatchingMetaInfoHolder};
use crate::query_api::definition::StreamDefinition;
use std::fmt::Debug;

mod external_time_window_processor;
mod external_time_window_state_holder;

pub use external_time_window_processor::{ExternalTimeWindowProcessor, ExternalTimeWindowState};
pub use external_time_window_state_holder::ExternalTimeWindowStateHolder;

/// Window used when a configuration does not name one.
pub const DEFAULT_WINDOW_TYPE: &str = "externalTime";

/// A processor that retains events and can capture and restore what it retains.
pub trait WindowProcessor: Processor {
    fn start(&self) {}
    fn stop(&self) {}

    fn current_state(&self) -> Result<StateBundle, StateError>;

    /// Replace the retained state with `state`. All or nothing: on error the
    /// window is unchanged.
    fn restore_state(&self, state: &StateBundle) -> Result<(), StateError>;
}

/// Lookup over a window's retained events, used by joins and patterns.
pub trait FindableProcessor: Send + Sync {
    /// Copy of the first retained event matching `condition` for `matching_event`.
    fn find(
        &self,
        matching_event: &StateEvent,
        condition: &dyn CompiledCondition,
    ) -> Option<StreamEvent>;

    fn compile_condition(
        &self,
        condition: Box<dyn ExpressionExecutor>,
        meta: MatchingMetaInfoHolder,
    ) -> Box<dyn CompiledCondition>;
}

/// Builds a window of one kind from a stream definition and its configuration.
pub trait WindowProcessorFactory: Debug + Send + Sync {
    fn name(&self) -> &'static str;
    fn create(
        &self,
        definition: &StreamDefinition,
        config: &FlatConfig,
        query_name: &str,
    ) -> EventFluxResult<Box<dyn WindowProcessor>>;
    fn clone_box(&self) -> Box<dyn WindowProcessorFactory>;
}

impl Clone for Box<dyn WindowProcessorFactory> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// All window kinds this crate provides.
pub fn window_factories() -> Vec<Box<dyn WindowProcessorFactory>> {
    vec![Box::new(ExternalTimeWindowFactory)]
}

/// Build the window named by the config's `type` key (default `externalTime`).
pub fn create_window_processor(
    definition: &StreamDefinition,
    config: &FlatConfig,
    query_name: &str,
) -> EventFluxResult<Box<dyn WindowProcessor>> {
    let window_type = config
        .get(WINDOW_TYPE_KEY)
        .map(String::as_str)
        .unwrap_or(DEFAULT_WINDOW_TYPE);
    let factories = window_factories();
    match factories.iter().find(|f| f.name() == window_type) {
        Some(factory) => factory.create(definition, config, query_name),
        None => {
            let available: Vec<&str> = factories.iter().map(|f| f.name()).collect();
            Err(EventFluxError::configuration(format!(
                "Unknown window type '{}'. Available: {:?}",
                window_type, available
            )))
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExternalTimeWindowFactory;

impl ExternalTimeWindowFactory {
    /// Resolve the timestamp attribute and duration into the two window parameters.
    pub fn parameters(
        definition: &StreamDefinition,
        config: &ExternalTimeWindowConfig,
    ) -> EventFluxResult<Vec<Box<dyn ExpressionExecutor>>> {
        let (index, attr_type) = definition
            .find_attribute(&config.timestamp_attribute)
            .ok_or_else(|| EventFluxError::InvalidParameter {
                message: format!(
                    "Stream '{}' has no attribute '{}'",
                    definition.get_id(),
                    config.timestamp_attribute
                ),
            })?;
        Ok(vec![
            Box::new(VariableExpressionExecutor::new_for_stream(
                index,
                attr_type,
                &config.timestamp_attribute,
            )),
            Box::new(ConstantExpressionExecutor::from_value(AttributeValue::Long(
                config.window_time_ms,
            ))),
        ])
    }

    pub fn create_from_config(
        definition: &StreamDefinition,
        config: &ExternalTimeWindowConfig,
        query_name: &str,
    ) -> EventFluxResult<ExternalTimeWindowProcessor> {
        let parameters = Self::parameters(definition, config)?;
        let cloner =
            StreamEventCloner::new_with_sizes(definition.get_attribute_list().len(), 0, 0);
        Ok(
            ExternalTimeWindowProcessor::new(parameters, cloner, query_name)?
                .with_compression(config.compression),
        )
    }
}

impl WindowProcessorFactory for ExternalTimeWindowFactory {
    fn name(&self) -> &'static str {
        "externalTime"
    }

    fn create(
        &self,
        definition: &StreamDefinition,
        config: &FlatConfig,
        query_name: &str,
    ) -> EventFluxResult<Box<dyn WindowProcessor>> {
        let config = ExternalTimeWindowConfig::from_flat_config(config)?;
        Ok(Box::new(Self::create_from_config(
            definition, &config, query_name,
        )?))
    }

    fn clone_box(&self) -> Box<dyn WindowProcessorFactory> {
        Box::new(Self {})
    }
}
