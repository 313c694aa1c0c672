// Activity feed domain model
use serde::Serialize;
use std::collections::VecDeque;

pub const DEFAULT_ACTIVITY_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityTemplate {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// Events picked at random for the feed on every cycle
pub const ACTIVITY_CATALOG: [ActivityTemplate; 8] = [
    ActivityTemplate {
        icon: "👤",
        title: "New User Registration",
        description: "User joined the platform",
    },
    ActivityTemplate {
        icon: "💳",
        title: "Payment Processed",
        description: "Transaction completed successfully",
    },
    ActivityTemplate {
        icon: "📧",
        title: "Email Sent",
        description: "Newsletter delivered to subscribers",
    },
    ActivityTemplate {
        icon: "🔔",
        title: "System Alert",
        description: "Performance threshold reached",
    },
    ActivityTemplate {
        icon: "📊",
        title: "Report Generated",
        description: "Monthly analytics compiled",
    },
    ActivityTemplate {
        icon: "🛒",
        title: "Order Placed",
        description: "New purchase order received",
    },
    ActivityTemplate {
        icon: "⚡",
        title: "Server Optimized",
        description: "Performance improvements applied",
    },
    ActivityTemplate {
        icon: "🔒",
        title: "Security Scan",
        description: "System security check completed",
    },
];

pub const RESET_ACTIVITY: ActivityTemplate = ActivityTemplate {
    icon: "🔄",
    title: "System Reset",
    description: "All data has been reset",
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub timestamp: String,
}

/// Newest-first list of activity entries with a fixed capacity.
///
/// Recording past capacity drops the oldest entry from the back.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
    capacity: usize,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn record(
        &mut self,
        icon: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        timestamp: impl Into<String>,
    ) {
        self.entries.push_front(ActivityEntry {
            icon: icon.into(),
            title: title.into(),
            description: description.into(),
            timestamp: timestamp.into(),
        });

        if self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    pub fn record_template(&mut self, template: &ActivityTemplate, timestamp: impl Into<String>) {
        self.record(template.icon, template.title, template.description, timestamp);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries newest first
    pub fn entries(&self) -> Vec<ActivityEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&ActivityEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVITY_CAPACITY)
    }
}
