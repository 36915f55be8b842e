// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A debugger that forwards findings through a channel.

use crate::report::{ReportEntry, ReportKind};
use parking_lot::Mutex;
use sentinel_core::{Debugger, ErrorType, WarningType};

/// A [`Debugger`] that sends every finding as a [`ReportEntry`] over a
/// [`flume`] channel, for consumption on another thread.
#[derive(Debug)]
pub struct ChannelDebugger {
    source: Mutex<String>,
    sender: flume::Sender<ReportEntry>,
}

impl ChannelDebugger {
    /// Creates a debugger with an unbounded channel and returns its receiving end.
    pub fn new() -> (Self, flume::Receiver<ReportEntry>) {
        let (sender, receiver) = flume::unbounded();
        (Self::with_sender(sender), receiver)
    }

    /// Creates a debugger that sends into an existing channel.
    pub fn with_sender(sender: flume::Sender<ReportEntry>) -> Self {
        Self {
            source: Mutex::new(String::new()),
            sender,
        }
    }

    fn send(&self, kind: ReportKind, message: &str) {
        let entry = ReportEntry {
            source: self.source.lock().clone(),
            kind,
            message: message.to_owned(),
        };
        if let Err(e) = self.sender.send(entry) {
            log::error!("ChannelDebugger: Failed to send report: {e}. Receiver likely disconnected.");
        }
    }
}

impl Debugger for ChannelDebugger {
    fn set_source(&self, source: &str) {
        *self.source.lock() = source.to_owned();
    }

    fn post_error(&self, error_type: ErrorType, message: &str) {
        self.send(ReportKind::Error(error_type), message);
    }

    fn post_warning(&self, warning_type: WarningType, message: &str) {
        self.send(ReportKind::Warning(warning_type), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flume::TryRecvError;

    #[test]
    fn test_findings_arrive_in_order() {
        let (debugger, receiver) = ChannelDebugger::new();
        debugger.set_source("dispatch");
        debugger.post_warning(WarningType::PointlessOperation, "zero work groups");
        debugger.post_error(ErrorType::InvalidState, "no compute pipeline state is bound");

        let first = receiver.try_recv().unwrap();
        assert_eq!(first.source, "dispatch");
        assert_eq!(first.kind, ReportKind::Warning(WarningType::PointlessOperation));
        let second = receiver.try_recv().unwrap();
        assert!(second.kind.is_error());
        assert!(matches!(receiver.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_disconnected_receiver_does_not_panic() {
        let (debugger, receiver) = ChannelDebugger::new();
        drop(receiver);
        debugger.post_error(ErrorType::InvalidArgument, "dropped");
    }
}
