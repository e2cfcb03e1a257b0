/// Stage registers, forwarding, hazards and whole-pipeline behavior.
pub mod pipeline;
