//! This module provides ways to tweak an in-memory document store, so that
//! it can return errors on some tests

use crate::error::StoreError;

/// This stores some behaviour tweaks, that describe how a mocked store will
/// behave during a given test
///
/// So that a function fails _n_ times after _m_ initial successes, set
/// `(m, n)` for the suited parameter
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// If this is true, every action will be allowed
    pub is_suspended: bool,

    pub list_documents_behaviour: (u32, u32),
    pub read_document_behaviour: (u32, u32),
    pub process_document_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// All operations will fail at once, for `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            list_documents_behaviour: (0, n_fails),
            read_document_behaviour: (0, n_fails),
            process_document_behaviour: (0, n_fails),
        }
    }

    /// Suspend this mock behaviour until you call `resume`
    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    /// Make this behaviour active again
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    pub fn can_list_documents(&mut self) -> Result<(), StoreError> {
        if self.is_suspended {
            return Ok(());
        }
        decrement(&mut self.list_documents_behaviour, "list_documents")
    }
    pub fn can_read_document(&mut self) -> Result<(), StoreError> {
        if self.is_suspended {
            return Ok(());
        }
        decrement(&mut self.read_document_behaviour, "read_document")
    }
    pub fn can_process_document(&mut self) -> Result<(), StoreError> {
        if self.is_suspended {
            return Ok(());
        }
        decrement(&mut self.process_document_behaviour, "process_document")
    }
}

/// Return Ok(()) in case the value is `(1+, _)` or `(_, 0)`, or return Err
/// and decrement otherwise
fn decrement(value: &mut (u32, u32), descr: &str) -> Result<(), StoreError> {
    let remaining_successes = value.0;
    let remaining_failures = value.1;

    if remaining_successes > 0 {
        value.0 = value.0 - 1;
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    } else if remaining_failures > 0 {
        value.1 = value.1 - 1;
        log::debug!("Mock behaviour: failing a {} ({:?})", descr, value);
        Err(StoreError::Backend(format!(
            "Mocked behaviour requires this {} to fail this time ({:?})",
            descr, value
        )))
    } else {
        log::debug!("Mock behaviour: allowing a {} ({:?})", descr, value);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mock_behaviour() {
        let mut ok = MockBehaviour::new();
        assert!(ok.can_list_documents().is_ok());
        assert!(ok.can_read_document().is_ok());
        assert!(ok.can_process_document().is_ok());
        assert!(ok.can_process_document().is_ok());

        let mut now = MockBehaviour::fail_now(2);
        assert!(now.can_list_documents().is_err());
        assert!(now.can_process_document().is_err());
        assert!(now.can_process_document().is_err());
        assert!(now.can_list_documents().is_err());
        assert!(now.can_list_documents().is_ok());
        assert!(now.can_process_document().is_ok());

        let mut custom = MockBehaviour {
            read_document_behaviour: (1, 3),
            ..MockBehaviour::default()
        };
        assert!(custom.can_read_document().is_ok());
        assert!(custom.can_read_document().is_err());
        assert!(custom.can_read_document().is_err());
        assert!(custom.can_read_document().is_err());
        assert!(custom.can_read_document().is_ok());

        custom.suspend();
        assert!(custom.can_list_documents().is_ok());
        custom.resume();
    }
}
