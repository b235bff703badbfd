// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Operator-configurable behavior of the approval workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkflowPolicy {
    /// When true, approving a reschedule or location change for a cancelled
    /// game returns it to `Active`.
    ///
    /// When false (the default) such an approval is rejected and the request
    /// stays pending.
    pub reopen_on_reschedule: bool,
}

impl WorkflowPolicy {
    /// Creates a policy.
    #[must_use]
    pub const fn new(reopen_on_reschedule: bool) -> Self {
        Self {
            reopen_on_reschedule,
        }
    }
}
