//! Per-category classification data.
//!
//! Each category is one [`CategoryDescriptor`]: a target rule, an oracle tag
//! vocabulary, named staples, and ordered text rules. The evaluator owns the
//! matching procedure; this module only holds data.

use std::sync::LazyLock;

use regex::Regex;
use tutor_core::{Category, Importance};

/// How the recommended card count is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRule {
    /// A constant tuned for a 100-card singleton deck.
    Fixed(u32),
    /// `max(1, round(per_hundred * total_cards / 100))`.
    PerHundred(u32),
}

impl TargetRule {
    #[must_use]
    pub fn target(self, total_cards: u32) -> u32 {
        match self {
            Self::Fixed(n) => n,
            Self::PerHundred(per_hundred) => {
                let scaled = (u64::from(per_hundred) * u64::from(total_cards) + 50) / 100;
                u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
            }
        }
    }
}

/// Which card field a text rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    OracleText,
    TypeLine,
}

/// A case-insensitive pattern with the tier and reasoning it implies.
#[derive(Debug, Clone, Copy)]
pub struct TextRule {
    pub field: Field,
    pub pattern: &'static str,
    pub importance: Importance,
    pub reason: &'static str,
}

/// The matching procedure a category uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherKind {
    /// Tag vocabulary, then staples, then text rules.
    Vocabulary,
    /// Every mainboard land, tiered by how well it fixes colors.
    Lands,
    /// Overlap with the commander's tags, creature types and mechanics.
    CommanderSynergy,
    /// Not yet implemented: no matches, fixed "coming soon" suggestion.
    Placeholder,
}

pub struct CategoryDescriptor {
    pub category: Category,
    pub matcher: MatcherKind,
    pub target: TargetRule,
    pub tags: &'static [&'static str],
    pub staples: &'static [&'static str],
    pub rules: &'static [TextRule],
    /// Lands only count when they carry a vocabulary tag.
    pub skip_lands: bool,
    /// Completes "prioritize ..." and "to reach the recommended N: ...".
    pub advice: &'static str,
    compiled: LazyLock<Vec<Option<Regex>>>,
}

impl CategoryDescriptor {
    /// The first matching text rule, if any.
    #[must_use]
    pub fn match_text(&self, oracle_text: &str, type_line: &str) -> Option<&'static TextRule> {
        self.rules.iter().zip(self.compiled.iter()).find_map(|(rule, regex)| {
            let haystack = match rule.field {
                Field::OracleText => oracle_text,
                Field::TypeLine => type_line,
            };
            regex
                .as_ref()
                .is_some_and(|regex| regex.is_match(haystack))
                .then_some(rule)
        })
    }

    #[must_use]
    pub fn vocabulary_tag<'a>(&self, tags: &'a [String]) -> Option<&'a str> {
        tags.iter()
            .map(String::as_str)
            .find(|tag| self.tags.contains(tag))
    }

    #[must_use]
    pub fn is_staple(&self, name: &str) -> bool {
        self.staples.iter().any(|s| s.eq_ignore_ascii_case(name))
    }
}

/// Compile text rules. A rule whose pattern fails to compile is logged and
/// never matches.
fn compile(rules: &[TextRule]) -> Vec<Option<Regex>> {
    rules
        .iter()
        .map(|rule| {
            Regex::new(&format!("(?i){}", rule.pattern))
                .inspect_err(|error| {
                    tracing::error!(pattern = rule.pattern, %error, "invalid text rule");
                })
                .ok()
        })
        .collect()
}

const fn oracle(pattern: &'static str, importance: Importance, reason: &'static str) -> TextRule {
    TextRule {
        field: Field::OracleText,
        pattern,
        importance,
        reason,
    }
}

/// Look up the descriptor for a category.
#[must_use]
pub fn descriptor(category: Category) -> &'static CategoryDescriptor {
    match category {
        Category::Ramp => &RAMP,
        Category::CardAdvantage => &CARD_ADVANTAGE,
        Category::Interaction => &INTERACTION,
        Category::WinConditions => &WIN_CONDITIONS,
        Category::TargetedRemoval => &TARGETED_REMOVAL,
        Category::BoardWipes => &BOARD_WIPES,
        Category::ManaBase => &MANA_BASE,
        Category::Synergy => &SYNERGY,
        Category::Protection => &PROTECTION,
    }
}

// ---------------------------------------------------------------------------
// Ramp
// ---------------------------------------------------------------------------

const RAMP_RULES: &[TextRule] = &[
    oracle(
        r"search your library for (up to \w+ )?(a |an )?(basic )?(land|forest|plains|island|swamp|mountain)",
        Importance::Medium,
        "Puts lands from the library into play",
    ),
    oracle(
        r"play (an )?additional lands?",
        Importance::Medium,
        "Grants extra land drops",
    ),
    oracle(
        r"\{t\}(, [^:]*)?: add (\{[wubrgc]\}|one mana|two mana|three mana|mana)",
        Importance::Medium,
        "Taps for mana",
    ),
    oracle(
        r"add (\{[wubrgc]\}){2,}",
        Importance::Medium,
        "Produces multiple mana",
    ),
    oracle(
        r"costs? \{\d+\} less to cast",
        Importance::Low,
        "Reduces spell costs",
    ),
    oracle(r"treasure token", Importance::Low, "Creates Treasure"),
];

static RAMP: CategoryDescriptor = CategoryDescriptor {
    category: Category::Ramp,
    matcher: MatcherKind::Vocabulary,
    target: TargetRule::Fixed(10),
    tags: &[
        "ramp",
        "mana-ramp",
        "mana-rock",
        "mana-dork",
        "mana-dork-egg",
        "land-ramp",
        "ritual",
        "cost-reduction",
        "adds-multiple-mana",
    ],
    staples: &[
        "Sol Ring",
        "Arcane Signet",
        "Mind Stone",
        "Fellwar Stone",
        "Cultivate",
        "Kodama's Reach",
        "Rampant Growth",
        "Nature's Lore",
        "Three Visits",
        "Farseek",
        "Llanowar Elves",
        "Birds of Paradise",
    ],
    rules: RAMP_RULES,
    skip_lands: true,
    advice: "mana rocks, mana dorks or land-fetching spells",
    compiled: LazyLock::new(|| compile(RAMP_RULES)),
};

// ---------------------------------------------------------------------------
// Card advantage
// ---------------------------------------------------------------------------

const CARD_ADVANTAGE_RULES: &[TextRule] = &[
    oracle(
        r"whenever [^.]*, (you may )?draw (a|one|two) cards?",
        Importance::Medium,
        "Repeatable card draw",
    ),
    oracle(
        r"\bdraws? (two|three|four|five|six|seven|x|\d+) cards",
        Importance::Medium,
        "Draws multiple cards",
    ),
    oracle(
        r"exile the top [^.]*\.[^.]*(you may (play|cast)|until)",
        Importance::Medium,
        "Impulse draw",
    ),
    oracle(r"\bdraws? a card", Importance::Low, "Cantrip"),
    oracle(
        r"search your library for (a|an|up to \w+) (\w+ )?cards?",
        Importance::Low,
        "Tutors for a card",
    ),
    oracle(r"investigate|clue token", Importance::Low, "Creates Clues"),
];

static CARD_ADVANTAGE: CategoryDescriptor = CategoryDescriptor {
    category: Category::CardAdvantage,
    matcher: MatcherKind::Vocabulary,
    target: TargetRule::Fixed(10),
    tags: &[
        "draw",
        "card-draw",
        "card-advantage",
        "cantrip",
        "repeatable-draw",
        "draw-engine",
        "impulse-draw",
        "wheel",
        "tutor",
        "curiosity",
    ],
    staples: &[
        "Rhystic Study",
        "Mystic Remora",
        "Phyrexian Arena",
        "Sylvan Library",
        "Esper Sentinel",
        "Skullclamp",
        "Guardian Project",
        "Beast Whisperer",
        "Harmonize",
        "Night's Whisper",
    ],
    rules: CARD_ADVANTAGE_RULES,
    skip_lands: true,
    advice: "repeatable draw engines and efficient card draw",
    compiled: LazyLock::new(|| compile(CARD_ADVANTAGE_RULES)),
};

// ---------------------------------------------------------------------------
// Interaction
// ---------------------------------------------------------------------------

const INTERACTION_RULES: &[TextRule] = &[
    oracle(
        r"counter target (\w+ )*?(spell|ability)",
        Importance::Medium,
        "Counters a spell or ability",
    ),
    oracle(
        r"(destroy|exile) (target|all|each)",
        Importance::Medium,
        "Removes permanents",
    ),
    oracle(
        r"(each|target) (player|opponent) sacrifices",
        Importance::Medium,
        "Edict effect",
    ),
    oracle(
        r"deals? (\d+|x) damage to (any target|target creature|each creature)",
        Importance::Low,
        "Damage-based removal",
    ),
    oracle(
        r"return (target|all) [^.]* to (its|their) owners?'? hands?",
        Importance::Low,
        "Bounces permanents",
    ),
];

static INTERACTION: CategoryDescriptor = CategoryDescriptor {
    category: Category::Interaction,
    matcher: MatcherKind::Vocabulary,
    target: TargetRule::Fixed(12),
    tags: &[
        "removal",
        "interaction",
        "spot-removal",
        "creature-removal",
        "artifact-removal",
        "enchantment-removal",
        "planeswalker-removal",
        "removal-exile",
        "removal-destroy",
        "removal-damage",
        "counterspell",
        "bounce",
        "edict",
        "board-wipe",
        "sweeper",
        "mass-removal",
    ],
    staples: &[
        "Swords to Plowshares",
        "Path to Exile",
        "Counterspell",
        "Beast Within",
        "Chaos Warp",
        "Cyclonic Rift",
        "Swan Song",
        "Generous Gift",
        "Anguished Unmaking",
        "Assassin's Trophy",
    ],
    rules: INTERACTION_RULES,
    skip_lands: true,
    advice: "instant-speed removal and counterspells",
    compiled: LazyLock::new(|| compile(INTERACTION_RULES)),
};

// ---------------------------------------------------------------------------
// Win conditions
// ---------------------------------------------------------------------------

const WIN_CONDITION_RULES: &[TextRule] = &[
    oracle(r"you win the game", Importance::Medium, "Alternate win condition"),
    oracle(
        r"each opponent loses (\d+|x|that much) life",
        Importance::Medium,
        "Drains every opponent",
    ),
    oracle(
        r"extra turn|additional combat phase|extra combat",
        Importance::Medium,
        "Extra turns or combats",
    ),
    oracle(
        r"creatures you control get \+(\d+|x)/\+(\d+|x)",
        Importance::Medium,
        "Team-wide pump",
    ),
    oracle(
        r"\b(infect|double strike)\b|can't be blocked",
        Importance::Low,
        "Evasive or amplified damage",
    ),
];

static WIN_CONDITIONS: CategoryDescriptor = CategoryDescriptor {
    category: Category::WinConditions,
    matcher: MatcherKind::Vocabulary,
    target: TargetRule::Fixed(5),
    tags: &[
        "win-condition",
        "wincon",
        "alternate-win-condition",
        "alt-win",
        "finisher",
        "combo-piece",
        "infinite-combo",
        "extra-turn",
        "extra-combat",
        "overrun",
        "drain",
    ],
    staples: &[
        "Craterhoof Behemoth",
        "Thassa's Oracle",
        "Laboratory Maniac",
        "Approach of the Second Sun",
        "Torment of Hailfire",
        "Exsanguinate",
        "Insurrection",
        "Triumph of the Hordes",
        "Finale of Devastation",
        "Aetherflux Reservoir",
        "Revel in Riches",
    ],
    rules: WIN_CONDITION_RULES,
    skip_lands: true,
    advice: "finishers that can close out a multiplayer game",
    compiled: LazyLock::new(|| compile(WIN_CONDITION_RULES)),
};

// ---------------------------------------------------------------------------
// Targeted removal
// ---------------------------------------------------------------------------

const TARGETED_REMOVAL_RULES: &[TextRule] = &[
    oracle(
        r"(destroy|exile) target ([a-z-]+ )*?(creature|artifact|enchantment|planeswalker|permanent)",
        Importance::Medium,
        "Removes a targeted permanent",
    ),
    oracle(
        r"target (player|opponent) sacrifices an? (creature|permanent)",
        Importance::Medium,
        "Edict effect",
    ),
    oracle(
        r"deals? (\d+|x) damage to (any target|target creature)",
        Importance::Low,
        "Damage-based removal",
    ),
    oracle(
        r"return target ([a-z-]+ )*?(creature|permanent) to its owner's hand",
        Importance::Low,
        "Bounces a permanent",
    ),
];

static TARGETED_REMOVAL: CategoryDescriptor = CategoryDescriptor {
    category: Category::TargetedRemoval,
    matcher: MatcherKind::Vocabulary,
    target: TargetRule::Fixed(8),
    tags: &[
        "removal",
        "spot-removal",
        "creature-removal",
        "artifact-removal",
        "enchantment-removal",
        "planeswalker-removal",
        "removal-exile",
        "removal-destroy",
        "removal-damage",
        "bounce",
        "edict",
    ],
    staples: &[
        "Swords to Plowshares",
        "Path to Exile",
        "Beast Within",
        "Chaos Warp",
        "Generous Gift",
        "Anguished Unmaking",
        "Assassin's Trophy",
        "Nature's Claim",
        "Rapid Hybridization",
    ],
    rules: TARGETED_REMOVAL_RULES,
    skip_lands: true,
    advice: "flexible instant-speed removal",
    compiled: LazyLock::new(|| compile(TARGETED_REMOVAL_RULES)),
};

// ---------------------------------------------------------------------------
// Board wipes
// ---------------------------------------------------------------------------

const BOARD_WIPE_RULES: &[TextRule] = &[
    oracle(
        r"(destroy|exile) (all|each) ",
        Importance::Medium,
        "Mass removal",
    ),
    oracle(
        r"deals? (\d+|x) damage to each creature",
        Importance::Medium,
        "Damage sweeper",
    ),
    oracle(
        r"return all [^.]* to (their|its) owners?'? hands?",
        Importance::Medium,
        "Mass bounce",
    ),
    oracle(
        r"(all|each) (other )?creatures? gets? -(\d+|x)/-(\d+|x)",
        Importance::Medium,
        "Shrinks every creature",
    ),
    oracle(
        r"each player sacrifices",
        Importance::Low,
        "Symmetric sacrifice",
    ),
];

static BOARD_WIPES: CategoryDescriptor = CategoryDescriptor {
    category: Category::BoardWipes,
    matcher: MatcherKind::Vocabulary,
    target: TargetRule::Fixed(3),
    tags: &[
        "board-wipe",
        "boardwipe",
        "sweeper",
        "wrath",
        "mass-removal",
        "mass-bounce",
        "mass-exile",
    ],
    staples: &[
        "Wrath of God",
        "Damnation",
        "Toxic Deluge",
        "Blasphemous Act",
        "Cyclonic Rift",
        "Farewell",
        "Austere Command",
        "Vanquish the Horde",
        "Supreme Verdict",
        "Evacuation",
    ],
    rules: BOARD_WIPE_RULES,
    skip_lands: true,
    advice: "board wipes to reset the battlefield",
    compiled: LazyLock::new(|| compile(BOARD_WIPE_RULES)),
};

// ---------------------------------------------------------------------------
// Mana base
// ---------------------------------------------------------------------------

const MANA_BASE_RULES: &[TextRule] = &[
    oracle(
        r"add one mana of any (color|type)|mana of any color",
        Importance::High,
        "Produces any color",
    ),
    oracle(
        r"add \{[wubrg]\}(,| or) \{[wubrg]\}",
        Importance::High,
        "Produces two or more colors",
    ),
    oracle(
        r"search your library for an? [^.]*(forest|island|swamp|mountain|plains|basic land)",
        Importance::High,
        "Fetches a land",
    ),
    TextRule {
        field: Field::TypeLine,
        pattern: r"\bbasic\b",
        importance: Importance::Low,
        reason: "Basic land",
    },
];

static MANA_BASE: CategoryDescriptor = CategoryDescriptor {
    category: Category::ManaBase,
    matcher: MatcherKind::Lands,
    target: TargetRule::PerHundred(36),
    tags: &[
        "mana-fixing",
        "fixing",
        "dual-land",
        "tri-land",
        "fetchland",
        "shockland",
        "checkland",
        "painland",
    ],
    staples: &[
        "Command Tower",
        "Exotic Orchard",
        "Path of Ancestry",
        "City of Brass",
        "Mana Confluence",
    ],
    rules: MANA_BASE_RULES,
    skip_lands: false,
    advice: "lands, ideally ones that fix your colors",
    compiled: LazyLock::new(|| compile(MANA_BASE_RULES)),
};

// ---------------------------------------------------------------------------
// Synergy
// ---------------------------------------------------------------------------

static SYNERGY: CategoryDescriptor = CategoryDescriptor {
    category: Category::Synergy,
    matcher: MatcherKind::CommanderSynergy,
    target: TargetRule::Fixed(20),
    tags: &[],
    staples: &[],
    rules: &[],
    skip_lands: true,
    advice: "cards that directly support your commander's strategy",
    compiled: LazyLock::new(Vec::new),
};

/// Mechanic phrases that tie a card to its commander when both mention them.
pub const SYNERGY_MECHANICS: &[&str] = &[
    "+1/+1 counter",
    "token",
    "sacrifice",
    "graveyard",
    "enters the battlefield",
    "instant or sorcery",
    "gain life",
    "attacks",
    "equipment",
    "aura",
    "landfall",
    "discard",
    "artifact",
    "enchantment",
];

// ---------------------------------------------------------------------------
// Placeholder categories
// ---------------------------------------------------------------------------

static PROTECTION: CategoryDescriptor = CategoryDescriptor {
    category: Category::Protection,
    matcher: MatcherKind::Placeholder,
    target: TargetRule::Fixed(10),
    tags: &[],
    staples: &[],
    rules: &[],
    skip_lands: false,
    advice: "",
    compiled: LazyLock::new(Vec::new),
};
