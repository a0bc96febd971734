use crate::core::announcement::{partial_failure_note, Announcement};
use crate::core::history::PreviousPairings;
use crate::core::potential::{build_potential_pairings, first_timers};
use crate::core::selector::{ByePolicy, PairingSelector};
use crate::domain::model::{Draw, PairingRound};
use crate::domain::ports::{CandidateSource, Confirmer, HistoryStore};
use crate::utils::error::{BuddyError, Result};
use crate::utils::validation::validate_roster;
use chrono::Utc;
use rand::Rng;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Everything a run needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct DrawSettings {
    pub bye_policy: ByePolicy,
    pub max_attempts: u32,
    /// Redraw without asking when someone is left unmatched, as long as
    /// attempts remain.
    pub redraw_on_unmatched: bool,
    /// Confirmed rounds are not written to history.
    pub dry_run: bool,
    pub announcement: Announcement,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            bye_policy: ByePolicy::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            redraw_on_unmatched: false,
            dry_run: false,
            announcement: Announcement::default(),
        }
    }
}

#[derive(Debug)]
enum DrawState {
    Proposed { attempt: u32 },
    Rejected { attempt: u32 },
    Confirmed { attempt: u32, draw: Draw, text: String },
    Exhausted { attempts: u32 },
}

#[derive(Debug, Clone)]
pub struct DrawOutcome {
    pub draw: Draw,
    /// The round appended to history. `None` on a dry run or when the draw
    /// produced no pairs.
    pub round: Option<PairingRound>,
    pub attempts: u32,
    pub first_timers: Vec<String>,
    pub announcement: String,
    pub history_written: bool,
}

pub struct DrawEngine<C, H, F, R>
where
    C: CandidateSource,
    H: HistoryStore,
    F: Confirmer,
    R: Rng,
{
    candidates: C,
    history: H,
    confirmer: F,
    rng: R,
    selector: PairingSelector,
    settings: DrawSettings,
}

impl<C, H, F, R> DrawEngine<C, H, F, R>
where
    C: CandidateSource,
    H: HistoryStore,
    F: Confirmer,
    R: Rng,
{
    pub fn new(candidates: C, history: H, confirmer: F, rng: R, settings: DrawSettings) -> Self {
        Self {
            candidates,
            history,
            confirmer,
            rng,
            selector: PairingSelector::new(settings.bye_policy.clone()),
            settings,
        }
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn confirmer(&self) -> &F {
        &self.confirmer
    }

    pub fn run(&mut self) -> Result<DrawOutcome> {
        tracing::info!("🍽️ Starting lunch buddy draw");

        let roster = self.candidates.load_candidates()?;
        validate_roster(&roster)?;
        tracing::info!("Loaded {} candidate(s)", roster.len());

        let rounds = self.history.load_history()?;
        tracing::info!("Loaded {} previous round(s)", rounds.len());

        let previous = PreviousPairings::from_rounds(&rounds);
        let potentials = build_potential_pairings(&roster, &previous);
        let newcomers = first_timers(&potentials);
        if !newcomers.is_empty() {
            tracing::info!("👋 {} first-timer(s) this round", newcomers.len());
        }

        let max_attempts = self.settings.max_attempts;
        let mut state = if max_attempts == 0 {
            DrawState::Exhausted { attempts: 0 }
        } else {
            DrawState::Proposed { attempt: 1 }
        };

        loop {
            tracing::debug!("Draw state: {:?}", state);

            state = match state {
                DrawState::Proposed { attempt } => {
                    tracing::info!("🎲 Drawing pairs (attempt {}/{})", attempt, max_attempts);
                    let draw = self.selector.select(&potentials, &mut self.rng);

                    let note = partial_failure_note(&draw);
                    if let Some(note) = &note {
                        tracing::warn!("⚠️ {}", note);
                    }

                    if note.is_some() && self.settings.redraw_on_unmatched && attempt < max_attempts {
                        tracing::info!("🔁 Redrawing automatically");
                        DrawState::Rejected { attempt }
                    } else {
                        let mut text = self.settings.announcement.render(&draw, &newcomers);
                        if let Some(note) = note {
                            text.push_str("\n\n");
                            text.push_str(&note);
                        }

                        if self.confirmer.confirm(&text)? {
                            DrawState::Confirmed { attempt, draw, text }
                        } else {
                            tracing::info!("❌ Pairing rejected");
                            DrawState::Rejected { attempt }
                        }
                    }
                }
                DrawState::Rejected { attempt } if attempt >= max_attempts => {
                    DrawState::Exhausted { attempts: attempt }
                }
                DrawState::Rejected { attempt } => DrawState::Proposed {
                    attempt: attempt + 1,
                },
                DrawState::Confirmed {
                    attempt,
                    draw,
                    text,
                } => return Ok(self.finish(attempt, draw, text, newcomers)),
                DrawState::Exhausted { attempts } => {
                    tracing::error!("❌ No confirmed pairing after {} attempt(s)", attempts);
                    return Err(BuddyError::AlgorithmExhausted { attempts });
                }
            };
        }
    }

    fn finish(
        &mut self,
        attempt: u32,
        draw: Draw,
        announcement: String,
        first_timers: Vec<String>,
    ) -> DrawOutcome {
        tracing::info!("✅ Pairing confirmed on attempt {}", attempt);

        if self.settings.dry_run {
            tracing::info!("🔍 DRY RUN MODE - history left untouched");
            return DrawOutcome {
                draw,
                round: None,
                attempts: attempt,
                first_timers,
                announcement,
                history_written: false,
            };
        }

        let pairs = draw.pairs();
        if pairs.is_empty() {
            tracing::warn!("⚠️ Confirmed draw has no pairs, nothing written to history");
            return DrawOutcome {
                draw,
                round: None,
                attempts: attempt,
                first_timers,
                announcement,
                history_written: false,
            };
        }

        let round = PairingRound::new(Utc::now(), pairs);

        // 寫入失敗只記錄，不回滾已確認的配對
        let history_written = match self.history.append_round(&round) {
            Ok(()) => {
                tracing::info!("📁 Round with {} pair(s) saved to history", round.buddies.len());
                true
            }
            Err(e) => {
                tracing::error!("❌ Failed to save round to history: {}", e);
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                false
            }
        };

        DrawOutcome {
            draw,
            round: Some(round),
            attempts: attempt,
            first_timers,
            announcement,
            history_written,
        }
    }
}
