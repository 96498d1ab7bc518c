//! Riddle challenges
//!
//! Reaching the chest with the key starts a timed word problem. Seven kinds,
//! picked uniformly; operand ranges grow with the explorer's rank:
//!
//! | kind       | problem                       | answer            |
//! |------------|-------------------------------|-------------------|
//! | Collecting | a, b in 1..=10r               | a + b             |
//! | Spending   | a in 10r..=20r, b in 1..=a    | a - b             |
//! | Treasures  | a in 1..=5+r, b in 1..=10     | a * b             |
//! | Sharing    | b in 1..=5+r, a = b * q       | a / b             |
//! | Mapping    | a in 30..=100                 | a to nearest ten  |
//! | Codes      | 4 terms, start 1..=5, step 2..=5 | next term      |
//! | Secrets    | triangle..hexagon             | edge count        |
//!
//! Answers are compared as exact strings.

use rand::Rng;

/// Points per correct answer, multiplied by rank
pub const POINTS_PER_RANK: u32 = 100;
/// Rank goes up every this many treasures
pub const TREASURES_PER_RANK: u32 = 5;
/// 20 seconds at 60 frames per second
pub const DEFAULT_TIME_LIMIT: u32 = 20 * 60;

/// Which kind of riddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChallengeKind {
    /// Addition
    Collecting,
    /// Subtraction
    Spending,
    /// Multiplication
    Treasures,
    /// Exact integer division
    Sharing,
    /// Rounding to the nearest ten
    Mapping,
    /// Arithmetic sequence continuation
    Codes,
    /// Polygon edge count
    Secrets,
}

impl ChallengeKind {
    pub const ALL: [ChallengeKind; 7] = [
        ChallengeKind::Collecting,
        ChallengeKind::Spending,
        ChallengeKind::Treasures,
        ChallengeKind::Sharing,
        ChallengeKind::Mapping,
        ChallengeKind::Codes,
        ChallengeKind::Secrets,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Shapes for the edge-count trivia
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polygon {
    Triangle,
    Square,
    Pentagon,
    Hexagon,
}

impl Polygon {
    pub const ALL: [Polygon; 4] = [
        Polygon::Triangle,
        Polygon::Square,
        Polygon::Pentagon,
        Polygon::Hexagon,
    ];

    pub fn edges(self) -> u32 {
        match self {
            Polygon::Triangle => 3,
            Polygon::Square => 4,
            Polygon::Pentagon => 5,
            Polygon::Hexagon => 6,
        }
    }

    /// The treasure-flavored object shaped like this polygon
    fn trinket(self) -> &'static str {
        match self {
            Polygon::Triangle => "a triangular amulet",
            Polygon::Square => "a square treasure map",
            Polygon::Pentagon => "a pentagonal coin",
            Polygon::Hexagon => "a hexagonal gem",
        }
    }
}

/// A riddle with its operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    Collecting { stones: u32, pebbles: u32 },
    Spending { coins: u32, spent: u32 },
    Treasures { chests: u32, gems: u32 },
    Sharing { coins: u32, crew: u32 },
    Mapping { paces: u32 },
    Codes { start: u32, step: u32 },
    Secrets { shape: Polygon },
}

/// Terms shown for a sequence riddle
pub const SEQUENCE_TERMS: u32 = 4;

/// Nearest multiple of ten. An exact half goes to the even ten (45 -> 40,
/// 55 -> 60).
fn round_to_ten(value: u32) -> u32 {
    let tens = value / 10;
    match value % 10 {
        0..=4 => tens * 10,
        5 if tens % 2 == 0 => tens * 10,
        _ => (tens + 1) * 10,
    }
}

impl Problem {
    /// Roll operands for `kind` at the given rank.
    pub fn generate<R: Rng + ?Sized>(kind: ChallengeKind, rank: u32, rng: &mut R) -> Self {
        let rank = rank.max(1);
        match kind {
            ChallengeKind::Collecting => Problem::Collecting {
                stones: rng.gen_range(1..=10 * rank),
                pebbles: rng.gen_range(1..=10 * rank),
            },
            ChallengeKind::Spending => {
                let coins = rng.gen_range(10 * rank..=20 * rank);
                Problem::Spending { coins, spent: rng.gen_range(1..=coins) }
            }
            ChallengeKind::Treasures => Problem::Treasures {
                chests: rng.gen_range(1..=5 + rank),
                gems: rng.gen_range(1..=10),
            },
            ChallengeKind::Sharing => {
                let crew = rng.gen_range(1..=5 + rank);
                Problem::Sharing { coins: crew * rng.gen_range(1..=10), crew }
            }
            ChallengeKind::Mapping => Problem::Mapping { paces: rng.gen_range(30..=100) },
            ChallengeKind::Codes => Problem::Codes {
                start: rng.gen_range(1..=5),
                step: rng.gen_range(2..=5),
            },
            ChallengeKind::Secrets => Problem::Secrets {
                shape: Polygon::ALL[rng.gen_range(0..Polygon::ALL.len())],
            },
        }
    }

    pub fn kind(&self) -> ChallengeKind {
        match self {
            Problem::Collecting { .. } => ChallengeKind::Collecting,
            Problem::Spending { .. } => ChallengeKind::Spending,
            Problem::Treasures { .. } => ChallengeKind::Treasures,
            Problem::Sharing { .. } => ChallengeKind::Sharing,
            Problem::Mapping { .. } => ChallengeKind::Mapping,
            Problem::Codes { .. } => ChallengeKind::Codes,
            Problem::Secrets { .. } => ChallengeKind::Secrets,
        }
    }

    /// The exact answer
    pub fn solution(&self) -> u32 {
        match *self {
            Problem::Collecting { stones, pebbles } => stones + pebbles,
            Problem::Spending { coins, spent } => coins - spent,
            Problem::Treasures { chests, gems } => chests * gems,
            Problem::Sharing { coins, crew } => coins / crew,
            Problem::Mapping { paces } => round_to_ten(paces),
            Problem::Codes { start, step } => start + step * SEQUENCE_TERMS,
            Problem::Secrets { shape } => shape.edges(),
        }
    }

    /// The natural-language riddle text
    pub fn prompt(&self) -> String {
        match *self {
            Problem::Collecting { stones, pebbles } => format!(
                "The treasure chest needs a special code! Count {} glowing stones and {} \
                 magical pebbles together to find the magic total.",
                stones, pebbles
            ),
            Problem::Spending { coins, spent } => format!(
                "Oh no! The treasure is locked! If you had {} gold coins and spent {} coins \
                 on supplies, how many coins remain in your pouch?",
                coins, spent
            ),
            Problem::Treasures { chests, gems } => format!(
                "You found {} treasure chests, each with {} gems. How many gems have you \
                 discovered in total?",
                chests, gems
            ),
            Problem::Sharing { coins, crew } => format!(
                "You need to share {} gold coins equally among {} crew members. How many \
                 coins does each crew member receive?",
                coins, crew
            ),
            Problem::Mapping { paces } => format!(
                "Map reading: About how many paces to the nearest ten is {} paces to the \
                 treasure?",
                paces
            ),
            Problem::Codes { start, step } => {
                let terms: Vec<String> = (0..SEQUENCE_TERMS)
                    .map(|i| (start + step * i).to_string())
                    .collect();
                format!("Decode the secret sequence: {}, ?", terms.join(", "))
            }
            Problem::Secrets { shape } => {
                format!("How many edges does {} have?", shape.trinket())
            }
        }
    }
}

/// How an attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeOutcome {
    Correct,
    Wrong,
    TimedOut,
}

/// A single timed attempt
#[derive(Debug, Clone, PartialEq)]
pub struct Challenge {
    pub problem: Problem,
    pub prompt: String,
    /// Expected answer, as the player must type it
    pub answer: String,
    /// Frames left before the attempt times out
    pub time_remaining: u32,
    pub time_limit: u32,
}

impl Challenge {
    pub fn new(problem: Problem, time_limit: u32) -> Self {
        Self {
            prompt: problem.prompt(),
            answer: problem.solution().to_string(),
            problem,
            time_remaining: time_limit,
            time_limit,
        }
    }

    pub fn kind(&self) -> ChallengeKind {
        self.problem.kind()
    }

    /// Exact string comparison, no trimming
    pub fn check(&self, input: &str) -> bool {
        input == self.answer
    }

    /// Count down one frame. Returns true once time has run out.
    pub fn tick(&mut self) -> bool {
        self.time_remaining = self.time_remaining.saturating_sub(1);
        self.is_expired()
    }

    pub fn is_expired(&self) -> bool {
        self.time_remaining == 0
    }

    /// Remaining time as a fraction in [0, 1]
    pub fn time_fraction(&self) -> f32 {
        if self.time_limit == 0 {
            return 0.0;
        }
        self.time_remaining as f32 / self.time_limit as f32
    }
}

/// Rolls challenges and tracks the explorer's rank
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeGenerator {
    rank: u32,
    time_limit: u32,
}

impl ChallengeGenerator {
    pub fn new(time_limit: u32) -> Self {
        Self { rank: 1, time_limit }
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    #[cfg(test)]
    pub fn set_rank(&mut self, rank: u32) {
        self.rank = rank.max(1);
    }

    /// Pick a kind uniformly and roll a fresh problem at the current rank
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Challenge {
        let kind = ChallengeKind::random(rng);
        Challenge::new(Problem::generate(kind, self.rank, rng), self.time_limit)
    }

    /// Reward for a correct answer at the current rank
    pub fn reward(&self) -> u32 {
        POINTS_PER_RANK * self.rank
    }

    /// Called with the new treasure total after a claim. Returns true if the
    /// rank went up.
    pub fn record_treasure(&mut self, treasures: u32) -> bool {
        if treasures > 0 && treasures % TREASURES_PER_RANK == 0 {
            self.rank += 1;
            true
        } else {
            false
        }
    }
}

impl Default for ChallengeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_LIMIT)
    }
}
