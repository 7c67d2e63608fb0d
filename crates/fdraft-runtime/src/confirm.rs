#![forbid(unsafe_code)]

//! The yes/no confirmation asked before restoring a draft.
//!
//! The engine treats the prompt as an external oracle: a synchronous function
//! from a prompt string to a boolean. Hosts plug in whatever UI they have —
//! a modal dialog, a terminal prompt — and tests plug in closures or the
//! [`AutoConfirm`] / [`AutoDecline`] stubs. The engine's `test` option skips
//! the oracle entirely.

/// Prompt used when the caller does not supply one.
pub const DEFAULT_RESTORE_PROMPT: &str = "You have cached data, fill it in?";

/// Synchronous yes/no confirmation.
pub trait ConfirmOracle {
    /// Ask the user `prompt`; `true` means restore.
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> ConfirmOracle for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Oracle that always answers yes.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoConfirm;

impl ConfirmOracle for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Oracle that always answers no.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoDecline;

impl ConfirmOracle for AutoDecline {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_oracles() {
        assert!(AutoConfirm.confirm("restore?"));
        assert!(!AutoDecline.confirm("restore?"));
    }

    #[test]
    fn closures_are_oracles() {
        let oracle = |prompt: &str| prompt.contains("cached");
        assert!(oracle.confirm(DEFAULT_RESTORE_PROMPT));
        assert!(!oracle.confirm("something else"));
    }
}
