// SPDX-License-Identifier: MIT OR Apache-2.0

//! External-time sliding window operator for the EventFlux CEP engine.
//!
//! The window buffers a time-bounded slice of a live stream, where "time" is a
//! monotonically increasing `LONG` attribute carried inside each event rather
//! than the wall clock. As new events arrive, retained events that fall out of
//! the window are re-emitted downstream as `EXPIRED` events, spliced in front
//! of the event that expired them.
//!
//! ```rust
//! use eventflux_window::core::event::stream::{ComplexEventChunk, StreamEvent, StreamEventCloner};
//! use eventflux_window::core::event::value::AttributeValue;
//! use eventflux_window::core::executor::{
//!     ConstantExpressionExecutor, ExpressionExecutor, VariableExpressionExecutor,
//! };
//! use eventflux_window::core::query::processor::stream::window::ExternalTimeWindowProcessor;
//! use eventflux_window::core::query::processor::Processor;
//! use eventflux_window::query_api::definition::attribute::Type as AttrType;
//!
//! let parameters: Vec<Box<dyn ExpressionExecutor>> = vec![
//!     Box::new(VariableExpressionExecutor::new_for_stream(0, AttrType::LONG, "ts")),
//!     Box::new(ConstantExpressionExecutor::new(AttributeValue::Long(1000), AttrType::LONG)),
//! ];
//! let window = ExternalTimeWindowProcessor::new(
//!     parameters,
//!     StreamEventCloner::new_with_sizes(1, 0, 0),
//!     "query1",
//! )?;
//!
//! let event = StreamEvent::new_with_data(0, vec![AttributeValue::Long(100)]);
//! window.process(ComplexEventChunk::from(vec![event]));
//! assert_eq!(window.retained_len(), 1);
//! # Ok::<(), eventflux_window::core::exception::EventFluxError>(())
//! ```

pub mod core;
pub mod query_api;
