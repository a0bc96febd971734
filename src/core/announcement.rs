use crate::domain::model::{Draw, Partner};

pub const DEFAULT_GREETING: &str = "@here Congratulations everyone!";

pub const DEFAULT_REMINDER: &str = "Remember, you have two weeks to complete your lunch buddy task \
(before the next draw). It doesn't have to be lunch - coffee, a gym session, a run or a walk \
around the park all count. Just get together sometime and have a chat.";

/// Chat-ready text for a draw.
#[derive(Debug, Clone)]
pub struct Announcement {
    greeting: String,
    reminder: String,
}

impl Default for Announcement {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING, DEFAULT_REMINDER)
    }
}

impl Announcement {
    pub fn new(greeting: impl Into<String>, reminder: impl Into<String>) -> Self {
        Self {
            greeting: greeting.into(),
            reminder: reminder.into(),
        }
    }

    /// `first_timers` is expected to be sorted already.
    pub fn render(&self, draw: &Draw, first_timers: &[String]) -> String {
        let mut lines = vec![self.greeting.clone(), String::new()];

        for pairing in &draw.pairings {
            let line = match &pairing.partner {
                Partner::Buddy(buddy) => format!(
                    "{} is having lunch with {} this fortnight!",
                    pairing.name, buddy
                ),
                Partner::SitsOut => format!("{} is sitting this fortnight out.", pairing.name),
                Partner::Unmatched => {
                    format!("{} could not be matched this fortnight.", pairing.name)
                }
            };
            lines.push(line);
        }

        lines.push(String::new());

        if !first_timers.is_empty() {
            lines.push(format!(
                "A warm welcome to our first-time lunch buddies: {}!",
                join_names(first_timers)
            ));
            lines.push(String::new());
        }

        lines.push(self.reminder.clone());
        lines.join("\n")
    }
}

/// 提醒操作者有人沒配到
pub fn partial_failure_note(draw: &Draw) -> Option<String> {
    let unmatched = draw.unmatched();
    if unmatched.is_empty() {
        return None;
    }

    let names: Vec<String> = unmatched.iter().map(|s| s.to_string()).collect();
    Some(format!(
        "WARNING: no valid partner left for {}. Reject to draw again.",
        join_names(&names)
    ))
}

/// `A`, `A and B`, `A, B and C`
fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Pairing;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_render_lists_every_pairing() {
        let draw = Draw::new(vec![
            Pairing::sits_out("Carol"),
            Pairing::buddy("Alice", "Bob"),
            Pairing::unmatched("Dave"),
        ]);

        let text = Announcement::default().render(&draw, &[]);

        assert!(text.starts_with(DEFAULT_GREETING));
        assert!(text.contains("Alice is having lunch with Bob this fortnight!"));
        assert!(text.contains("Carol is sitting this fortnight out."));
        assert!(text.contains("Dave could not be matched this fortnight."));
        assert!(text.ends_with(DEFAULT_REMINDER));
        assert!(!text.contains("welcome"));
    }

    #[test]
    fn test_render_welcomes_first_timers() {
        let draw = Draw::new(vec![Pairing::buddy("alice", "Bob")]);
        let text = Announcement::new("Hi all", "See you")
            .render(&draw, &names(&["alice", "Bob", "carol"]));

        assert_eq!(
            text,
            "Hi all\n\nalice is having lunch with Bob this fortnight!\n\n\
             A warm welcome to our first-time lunch buddies: alice, Bob and carol!\n\nSee you"
        );
    }

    #[test]
    fn test_join_names() {
        assert_eq!(join_names(&[]), "");
        assert_eq!(join_names(&names(&["Alice"])), "Alice");
        assert_eq!(join_names(&names(&["Alice", "Bob"])), "Alice and Bob");
        assert_eq!(join_names(&names(&["Alice", "Bob", "Carol"])), "Alice, Bob and Carol");
    }

    #[test]
    fn test_partial_failure_note() {
        let clean = Draw::new(vec![Pairing::buddy("Alice", "Bob")]);
        assert!(partial_failure_note(&clean).is_none());

        let broken = Draw::new(vec![Pairing::unmatched("Alice"), Pairing::unmatched("Bob")]);
        let note = partial_failure_note(&broken).unwrap();
        assert!(note.contains("Alice and Bob"));
    }
}
