// gRPC service surface for the analysis engine.
// The protobuf/tonic code for the `analysis` package is generated by
// build.rs from proto/analysis.proto.

pub mod analysis_service;

tonic::include_proto!("analysis");

pub use analysis_engine_server::{AnalysisEngine, AnalysisEngineServer};

// Aliases keep the generated wire types distinguishable from the domain
// models of the same name.
pub use self::IndicatorSeries as ProtoIndicatorSeries;
pub use self::PriceBar as ProtoPriceBar;
