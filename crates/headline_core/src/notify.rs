use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEntry {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
}

/// Live transient notifications, oldest first.
///
/// Entries are independent: no deduplication, and removal of one never
/// affects another. Only the cap evicts entries early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationCenter {
    entries: VecDeque<NotificationEntry>,
    next_id: u64,
    cap: usize,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::with_cap(20)
    }
}

impl NotificationCenter {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            next_id: 1,
            cap: cap.max(1),
        }
    }

    pub fn push(&mut self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        self.entries.push_back(NotificationEntry {
            id,
            message: message.into(),
            kind,
        });
        while self.entries.len() > self.cap {
            self.entries.pop_front();
        }
        id
    }

    /// Removes the entry if it is still shown.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn entries(&self) -> impl Iterator<Item = &NotificationEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_stack_independently() {
        let mut center = NotificationCenter::default();
        let first = center.push("same", NotificationKind::Error);
        let second = center.push("same", NotificationKind::Error);
        assert_ne!(first, second);
        assert_eq!(center.len(), 2);

        assert!(center.dismiss(first));
        assert_eq!(center.entries().next().map(|e| e.id), Some(second));
    }

    #[test]
    fn dismissing_twice_reports_nothing_removed() {
        let mut center = NotificationCenter::default();
        let id = center.push("hello", NotificationKind::Info);
        assert!(center.dismiss(id));
        assert!(!center.dismiss(id));
        assert!(center.is_empty());
    }

    #[test]
    fn cap_drops_oldest_entries() {
        let mut center = NotificationCenter::with_cap(3);
        for n in 0..5 {
            center.push(format!("failure {n}"), NotificationKind::Error);
        }
        let messages: Vec<_> = center.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["failure 2", "failure 3", "failure 4"]);
    }
}
