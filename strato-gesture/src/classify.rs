use crate::frame::{landmark, HandFrame};
use serde::{Deserialize, Serialize};

/// Classified gesture label. `None` covers both "no hand in frame" and
/// "hand matched no rule".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gesture {
    None,
    Fist,
    Palm,
    ThumbsUp,
    Peace,
    Point,
}

impl Gesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gesture::None => "none",
            Gesture::Fist => "fist",
            Gesture::Palm => "palm",
            Gesture::ThumbsUp => "thumbsup",
            Gesture::Peace => "peace",
            Gesture::Point => "point",
        }
    }
}

/// Which joint each fingertip is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceJoint {
    /// Knuckle at the base of the finger.
    Mcp,
    /// First joint above the knuckle.
    Pip,
}

/// Per-finger signals derived from one frame. Index order: index, middle,
/// ring, pinky. With a nonzero threshold a finger can be neither extended
/// nor curled.
#[derive(Debug, Clone, Copy)]
pub struct FingerSignals {
    pub extended: [bool; 4],
    pub curled: [bool; 4],
    pub thumb_above_index_mcp: bool,
}

impl FingerSignals {
    pub fn extended_count(&self) -> usize {
        self.extended.iter().filter(|&&e| e).count()
    }

    pub fn curled_count(&self) -> usize {
        self.curled.iter().filter(|&&c| c).count()
    }
}

/// Condition under which a rule's label fires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RuleCondition {
    /// Exactly this many of the four tracked fingers extended.
    ExtendedExactly(usize),
    /// At least this many curl signals true.
    CurledAtLeast(usize),
    /// Per-finger pattern; `None` entries are don't-cares.
    Fingers {
        extended: [Option<bool>; 4],
        curled: [Option<bool>; 4],
        thumb_above_index_mcp: bool,
    },
}

impl RuleCondition {
    fn matches(&self, signals: &FingerSignals) -> bool {
        match self {
            RuleCondition::ExtendedExactly(n) => signals.extended_count() == *n,
            RuleCondition::CurledAtLeast(n) => signals.curled_count() >= *n,
            RuleCondition::Fingers {
                extended,
                curled,
                thumb_above_index_mcp,
            } => {
                let fingers_match = extended
                    .iter()
                    .zip(signals.extended.iter())
                    .all(|(want, got)| want.map_or(true, |w| w == *got))
                    && curled
                        .iter()
                        .zip(signals.curled.iter())
                        .all(|(want, got)| want.map_or(true, |w| w == *got));
                fingers_match && (!thumb_above_index_mcp || signals.thumb_above_index_mcp)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureRule {
    pub label: Gesture,
    pub when: RuleCondition,
}

/// A classification vocabulary: the reference joint, the extension
/// threshold, and an ordered rule table (first match wins). The geometric
/// thresholds are tunable configuration, not fixed constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureVocabulary {
    pub reference: ReferenceJoint,
    pub extend_threshold: f32,
    pub rules: Vec<GestureRule>,
}

impl GestureVocabulary {
    /// Fist / palm / thumbs-up, measured against the knuckles. Fist scrolls
    /// the result list down, thumbs-up scrolls it up, palm resets the form.
    pub fn navigate() -> Self {
        Self {
            reference: ReferenceJoint::Mcp,
            extend_threshold: 0.0,
            rules: vec![
                GestureRule {
                    label: Gesture::Fist,
                    when: RuleCondition::ExtendedExactly(0),
                },
                GestureRule {
                    label: Gesture::Palm,
                    when: RuleCondition::ExtendedExactly(4),
                },
                GestureRule {
                    label: Gesture::ThumbsUp,
                    when: RuleCondition::Fingers {
                        extended: [Some(true), Some(false), None, None],
                        curled: [None; 4],
                        thumb_above_index_mcp: true,
                    },
                },
            ],
        }
    }

    /// Peace / point / fist, measured against the first finger joints with a
    /// margin. Peace scrolls the page down, point scrolls it up, fist pauses.
    pub fn scroll() -> Self {
        Self {
            reference: ReferenceJoint::Pip,
            extend_threshold: 0.05,
            rules: vec![
                GestureRule {
                    label: Gesture::Peace,
                    when: RuleCondition::Fingers {
                        extended: [Some(true), Some(true), None, None],
                        curled: [None, None, Some(true), Some(true)],
                        thumb_above_index_mcp: false,
                    },
                },
                GestureRule {
                    label: Gesture::Point,
                    when: RuleCondition::Fingers {
                        extended: [Some(true), None, None, None],
                        curled: [None, Some(true), Some(true), Some(true)],
                        thumb_above_index_mcp: false,
                    },
                },
                GestureRule {
                    label: Gesture::Fist,
                    when: RuleCondition::CurledAtLeast(4),
                },
            ],
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "navigate" => Some(Self::navigate()),
            "scroll" => Some(Self::scroll()),
            _ => None,
        }
    }

    fn signals(&self, frame: &HandFrame) -> FingerSignals {
        let refs = match self.reference {
            ReferenceJoint::Mcp => [
                landmark::INDEX_MCP,
                landmark::MIDDLE_MCP,
                landmark::RING_MCP,
                landmark::PINKY_MCP,
            ],
            ReferenceJoint::Pip => [
                landmark::INDEX_PIP,
                landmark::MIDDLE_PIP,
                landmark::RING_PIP,
                landmark::PINKY_PIP,
            ],
        };
        let tips = [
            landmark::INDEX_TIP,
            landmark::MIDDLE_TIP,
            landmark::RING_TIP,
            landmark::PINKY_TIP,
        ];

        let mut extended = [false; 4];
        let mut curled = [false; 4];
        for i in 0..4 {
            let tip_y = frame.point(tips[i]).y;
            let ref_y = frame.point(refs[i]).y;
            // Smaller y is higher on screen.
            extended[i] = tip_y < ref_y - self.extend_threshold;
            curled[i] = tip_y > ref_y;
        }

        FingerSignals {
            extended,
            curled,
            thumb_above_index_mcp: frame.point(landmark::THUMB_TIP).y
                < frame.point(landmark::INDEX_MCP).y,
        }
    }

    /// Classify one frame. Pure: identical landmarks always yield the same
    /// label, with no dependency on prior frames.
    pub fn classify(&self, frame: Option<&HandFrame>) -> Gesture {
        let Some(frame) = frame else {
            return Gesture::None;
        };

        let signals = self.signals(frame);
        self.rules
            .iter()
            .find(|rule| rule.when.matches(&signals))
            .map(|rule| rule.label)
            .unwrap_or(Gesture::None)
    }
}
