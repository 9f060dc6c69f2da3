//! Execution policies for `For` statements.
//!
//! Policies are zero-sized markers selected in the statement type; the
//! `PolicyKind` enum is their runtime name, used by configuration and the CLI
//! to pick one of the monomorphic kernels.

use std::fmt;
use std::str::FromStr;

/// Compile-time execution policy marker.
pub trait ExecPolicy {
    /// Name shown in rendered statement trees.
    const NAME: &'static str;
}

/// Plain sequential traversal.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeqExec;

/// Sequential traversal written for the auto-vectoriser: no early exits,
/// no cross-iteration state in the loop itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimdExec;

/// Iterations distributed over the rayon worker pool.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParExec;

impl ExecPolicy for SeqExec {
    const NAME: &'static str = "seq_exec";
}

impl ExecPolicy for SimdExec {
    const NAME: &'static str = "simd_exec";
}

impl ExecPolicy for ParExec {
    const NAME: &'static str = "par_exec";
}

/// Runtime selector for one of the policy markers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PolicyKind {
    #[default]
    Seq,
    Simd,
    Par,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [PolicyKind::Seq, PolicyKind::Simd, PolicyKind::Par];

    /// Marker name of the policy this kind selects.
    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Seq => SeqExec::NAME,
            PolicyKind::Simd => SimdExec::NAME,
            PolicyKind::Par => ParExec::NAME,
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = match self {
            PolicyKind::Seq => "seq",
            PolicyKind::Simd => "simd",
            PolicyKind::Par => "par",
        };
        f.write_str(short)
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seq" | "seq_exec" => Ok(PolicyKind::Seq),
            "simd" | "simd_exec" => Ok(PolicyKind::Simd),
            "par" | "par_exec" => Ok(PolicyKind::Par),
            other => Err(format!(
                "unknown policy '{}' (expected seq, simd or par)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_and_marker_names() {
        assert_eq!("seq".parse::<PolicyKind>(), Ok(PolicyKind::Seq));
        assert_eq!("simd_exec".parse::<PolicyKind>(), Ok(PolicyKind::Simd));
        assert_eq!("par".parse::<PolicyKind>(), Ok(PolicyKind::Par));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "omp".parse::<PolicyKind>().unwrap_err();
        assert!(err.contains("omp"));
    }

    #[test]
    fn test_display_round_trips() {
        for kind in PolicyKind::ALL {
            assert_eq!(kind.to_string().parse::<PolicyKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_marker_names() {
        assert_eq!(PolicyKind::Par.name(), "par_exec");
        assert_eq!(SimdExec::NAME, "simd_exec");
    }
}
