pub mod split_pipeline;
