//! Task definitions, rule file loading and the task registry

mod definition;
mod loader;
mod registry;

pub use definition::{
    LevelRule, ProbeDefinition, Prompt, RawLevelRule, RawProbe, RawRule, RawTaskDefinition,
    Rule, RuleId, TaskDefinition,
};
pub use loader::{RuleFormat, load_task_file, parse_task};
pub use registry::TaskRegistry;

#[cfg(test)]
pub(crate) use definition::fixtures;
