//! Code task names such as `surface_code:rotated_memory_x`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use tessel_ir::Basis;

use crate::error::{GenError, GenResult};

/// Family of codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeFamily {
    /// Planar surface code with boundaries.
    SurfaceCode,
    /// Periodic surface code without boundaries.
    ToricCode,
}

impl CodeFamily {
    pub fn name(&self) -> &'static str {
        match self {
            CodeFamily::SurfaceCode => "surface_code",
            CodeFamily::ToricCode => "toric_code",
        }
    }
}

impl FromStr for CodeFamily {
    type Err = GenError;

    fn from_str(s: &str) -> GenResult<Self> {
        match s {
            "surface_code" => Ok(CodeFamily::SurfaceCode),
            "toric_code" => Ok(CodeFamily::ToricCode),
            other => Err(GenError::UnknownCodeFamily(other.to_string())),
        }
    }
}

impl fmt::Display for CodeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Memory experiment flavour: lattice orientation and memory basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryTask {
    RotatedMemoryX,
    RotatedMemoryZ,
    UnrotatedMemoryX,
    UnrotatedMemoryZ,
}

impl MemoryTask {
    pub fn name(&self) -> &'static str {
        match self {
            MemoryTask::RotatedMemoryX => "rotated_memory_x",
            MemoryTask::RotatedMemoryZ => "rotated_memory_z",
            MemoryTask::UnrotatedMemoryX => "unrotated_memory_x",
            MemoryTask::UnrotatedMemoryZ => "unrotated_memory_z",
        }
    }

    /// Basis the logical qubit is prepared and measured in.
    pub fn basis(&self) -> Basis {
        match self {
            MemoryTask::RotatedMemoryX | MemoryTask::UnrotatedMemoryX => Basis::X,
            MemoryTask::RotatedMemoryZ | MemoryTask::UnrotatedMemoryZ => Basis::Z,
        }
    }

    pub fn is_rotated(&self) -> bool {
        matches!(self, MemoryTask::RotatedMemoryX | MemoryTask::RotatedMemoryZ)
    }
}

impl FromStr for MemoryTask {
    type Err = GenError;

    fn from_str(s: &str) -> GenResult<Self> {
        match s {
            "rotated_memory_x" => Ok(MemoryTask::RotatedMemoryX),
            "rotated_memory_z" => Ok(MemoryTask::RotatedMemoryZ),
            "unrotated_memory_x" => Ok(MemoryTask::UnrotatedMemoryX),
            "unrotated_memory_z" => Ok(MemoryTask::UnrotatedMemoryZ),
            other => Err(GenError::UnknownTask(other.to_string())),
        }
    }
}

impl fmt::Display for MemoryTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A supported (family, task) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeTask {
    pub family: CodeFamily,
    pub task: MemoryTask,
}

impl CodeTask {
    /// Pair a family with a task, rejecting rotated toric codes.
    pub fn new(family: CodeFamily, task: MemoryTask) -> GenResult<Self> {
        if family == CodeFamily::ToricCode && task.is_rotated() {
            return Err(GenError::UnsupportedTask {
                family: family.to_string(),
                task: task.to_string(),
            });
        }
        Ok(Self { family, task })
    }

    /// Every supported combination.
    pub fn all() -> Vec<CodeTask> {
        let tasks = [
            MemoryTask::RotatedMemoryX,
            MemoryTask::RotatedMemoryZ,
            MemoryTask::UnrotatedMemoryX,
            MemoryTask::UnrotatedMemoryZ,
        ];
        [CodeFamily::SurfaceCode, CodeFamily::ToricCode]
            .into_iter()
            .flat_map(|family| tasks.into_iter().filter_map(move |task| Self::new(family, task).ok()))
            .collect()
    }
}

impl FromStr for CodeTask {
    type Err = GenError;

    /// Parses `family:task`. The family is checked before the task.
    fn from_str(s: &str) -> GenResult<Self> {
        let (family, task) = s
            .split_once(':')
            .ok_or_else(|| GenError::MalformedCodeTask(s.to_string()))?;
        let family: CodeFamily = family.parse()?;
        let task: MemoryTask = task.parse()?;
        Self::new(family, task)
    }
}

impl fmt::Display for CodeTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.family, self.task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        for name in [
            "surface_code:rotated_memory_x",
            "surface_code:rotated_memory_z",
            "surface_code:unrotated_memory_x",
            "surface_code:unrotated_memory_z",
            "toric_code:unrotated_memory_x",
            "toric_code:unrotated_memory_z",
        ] {
            let task: CodeTask = name.parse().unwrap();
            assert_eq!(task.to_string(), name);
        }
        assert_eq!(CodeTask::all().len(), 6);
    }

    #[test]
    fn test_unknown_family_checked_first() {
        assert!(matches!(
            "color_code:rotated_memory_x".parse::<CodeTask>(),
            Err(GenError::UnknownCodeFamily(name)) if name == "color_code"
        ));
        assert!(matches!(
            "color_code:nonsense".parse::<CodeTask>(),
            Err(GenError::UnknownCodeFamily(_))
        ));
    }

    #[test]
    fn test_unknown_task() {
        let err = "surface_code:memory_y".parse::<CodeTask>().unwrap_err();
        assert!(matches!(err, GenError::UnknownTask(_)));
        assert_eq!(err.to_string(), "Unrecognised task: memory_y");
    }

    #[test]
    fn test_toric_rotated_rejected() {
        assert!(matches!(
            "toric_code:rotated_memory_z".parse::<CodeTask>(),
            Err(GenError::UnsupportedTask { .. })
        ));
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            "surface_code".parse::<CodeTask>(),
            Err(GenError::MalformedCodeTask(_))
        ));
    }

    #[test]
    fn test_basis() {
        assert_eq!(MemoryTask::RotatedMemoryX.basis(), Basis::X);
        assert_eq!(MemoryTask::UnrotatedMemoryZ.basis(), Basis::Z);
    }
}
