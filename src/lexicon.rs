//! Word classification tables for lexical scoring.
//!
//! A [`Lexicon`] is built once and then only read. Engines share it through
//! an `Arc`, so independent documents can be scored in parallel without any
//! synchronization.

use std::collections::HashSet;

/// Default look-back, in tokens, of the linear negation window.
pub const DEFAULT_NEGATION_WINDOW: usize = 5;

/// Sentiment polarity of a lexicon entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Positive,
    Negative,
}

/// Immutable positive/negative/intensifier/negator word sets.
///
/// Entries are stored lowercase; lookups expect lowercase lemmas, which is
/// what the document model produces.
#[derive(Debug, Clone)]
pub struct Lexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
    intensifiers: HashSet<String>,
    negators: HashSet<String>,
    negation_window: usize,
}

impl Lexicon {
    /// Start an empty lexicon.
    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::default()
    }

    /// The built-in Hungarian lexicon (opinion, education and review vocabulary).
    pub fn hungarian() -> Self {
        LexiconBuilder::hungarian().build()
    }

    /// Polarity of a lemma. Positive entries win when a lemma is in both sets.
    pub fn polarity(&self, lemma: &str) -> Option<Polarity> {
        if self.positive.contains(lemma) {
            Some(Polarity::Positive)
        } else if self.negative.contains(lemma) {
            Some(Polarity::Negative)
        } else {
            None
        }
    }

    pub fn is_positive(&self, lemma: &str) -> bool {
        self.positive.contains(lemma)
    }

    pub fn is_negative(&self, lemma: &str) -> bool {
        self.negative.contains(lemma)
    }

    pub fn is_intensifier(&self, lemma: &str) -> bool {
        self.intensifiers.contains(lemma)
    }

    pub fn is_negator(&self, lemma: &str) -> bool {
        self.negators.contains(lemma)
    }

    /// How many preceding tokens the linear negation rule inspects.
    pub fn negation_window(&self) -> usize {
        self.negation_window
    }

    /// Sizes of the four word sets: (positive, negative, intensifiers, negators).
    pub fn sizes(&self) -> (usize, usize, usize, usize) {
        (
            self.positive.len(),
            self.negative.len(),
            self.intensifiers.len(),
            self.negators.len(),
        )
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::hungarian()
    }
}

/// Accumulates word lists before freezing them into a [`Lexicon`].
#[derive(Debug, Clone)]
pub struct LexiconBuilder {
    positive: HashSet<String>,
    negative: HashSet<String>,
    intensifiers: HashSet<String>,
    negators: HashSet<String>,
    negation_window: usize,
}

impl Default for LexiconBuilder {
    fn default() -> Self {
        Self {
            positive: HashSet::new(),
            negative: HashSet::new(),
            intensifiers: HashSet::new(),
            negators: HashSet::new(),
            negation_window: DEFAULT_NEGATION_WINDOW,
        }
    }
}

fn extend_lowercase<I, S>(set: &mut HashSet<String>, words: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    set.extend(
        words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty()),
    );
}

impl LexiconBuilder {
    /// A builder pre-filled with the built-in Hungarian word lists.
    pub fn hungarian() -> Self {
        Self::default()
            .positive(HU_POSITIVE.iter())
            .negative(HU_NEGATIVE.iter())
            .intensifiers(HU_INTENSIFIERS.iter())
            .negators(HU_NEGATORS.iter())
    }

    pub fn positive<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extend_lowercase(&mut self.positive, words);
        self
    }

    pub fn negative<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extend_lowercase(&mut self.negative, words);
        self
    }

    pub fn intensifiers<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extend_lowercase(&mut self.intensifiers, words);
        self
    }

    pub fn negators<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extend_lowercase(&mut self.negators, words);
        self
    }

    pub fn negation_window(mut self, window: usize) -> Self {
        self.negation_window = window;
        self
    }

    pub fn build(self) -> Lexicon {
        Lexicon {
            positive: self.positive,
            negative: self.negative,
            intensifiers: self.intensifiers,
            negators: self.negators,
            negation_window: self.negation_window,
        }
    }
}

const HU_POSITIVE: &[&str] = &[
    // general
    "jó", "kiváló", "remek", "fantasztikus", "nagyszerű", "kitűnő",
    "csodálatos", "tökéletes", "szuper", "briliáns", "örömteli",
    "hasznos", "segítőkész", "szakszerű", "igényes", "precíz",
    "innovatív", "lelkes", "ügyes", "tehetséges", "inspiráló",
    "motiváló", "érdekes", "érthető", "logikus", "átlátható",
    "konstruktív", "fejlesztő", "hatékony", "sikeres", "professzionális",
    // evaluative
    "ajánlom", "ajánlanám", "elégedett", "elégedettség", "tetszik",
    "szeretem", "imádom", "szép", "kellemes", "barátságos", "örülök",
    "boldog", "izgalmas", "lenyűgöző", "meglepő", "pozitív", "optimista",
    // education
    "szemléletes", "közérthető", "gyakorlatias", "naprakész", "alapos",
    "felkészült", "lelkiismeretes", "türelmes", "empatikus", "dinamikus",
    "strukturált", "interaktív", "élvezetes", "tanulságos",
    "kimagasló", "kiemelkedő", "elsőrangú", "méltányolandó",
    "pontos", "részletes", "átfogó", "informatív",
    "megbízható", "stabil", "tiszta", "egyértelmű", "gördülékeny",
    "kényelmes", "szervezett", "következetes", "rugalmas", "támogató",
    "ösztönző", "figyelmes", "gondos", "kreatív", "eredeti",
    "friss", "modern", "releváns", "megfelelő",
    "gyors", "hatásos", "eredményes", "teljes", "komplex",
    "különleges", "kiemelten", "magas", "erős", "szilárd",
    "élő", "pezsgő", "aktív", "bevonó", "öszintén", "igaz",
];

const HU_NEGATIVE: &[&str] = &[
    // general
    "rossz", "gyenge", "silány", "szörnyű", "borzasztó", "rettenetes",
    "katasztrofális", "értelmetlen", "összefüggéstelen",
    "érthetetlen", "zavaros", "kaotikus", "rendezetlen", "elavult",
    "irreleváns", "felesleges", "hasznontalan", "bosszantó", "frusztráló",
    "idegesítő", "lassú", "hiányos", "hibás", "problémás",
    // evaluative
    "csalódottság", "csalódott", "utálom", "szegényes", "kifogásolható",
    "pontatlan", "felületes", "sablonos", "unalmas", "demotiváló",
    // education
    "száraz", "monoton", "élettelen", "elmaradott", "korszerűtlen",
    "nehézkes", "áttekinthetetlen", "következetlen", "kapkodó",
    "felkészületlen", "türelmetlen", "lekezelő",
    "elfogadhatatlan", "tarthatatlan", "siralmas",
    "nehéz", "bonyolult", "zavaró", "kellemetlen",
    "homályos", "kusza", "megbízhatatlan", "töredékes",
    "sekélyes", "sivár", "érdektelen", "ósdi",
    "akadozó", "bugos", "törött", "nem_működik",
    "értéktelen", "haszontalan", "kárba", "veszteség",
    "körülményes", "macerás", "fárasztó", "kimerítő",
    "unszolós", "tolakodó", "elviselhetetlen", "terhes",
    "csalódás", "cserbenhagyott", "becsapott", "félrevezető",
];

const HU_INTENSIFIERS: &[&str] = &[
    "nagyon", "igen", "rendkívül", "kifejezetten", "különösen",
    "eléggé", "igazán", "teljesen", "abszolút", "végtelenül",
    "meglehetősen", "elég", "igencsak", "alaposan",
    "rendkívüli", "kivételesen", "határozottan", "erősen", "mélyen",
];

const HU_NEGATORS: &[&str] = &[
    "nem", "se", "sem", "soha", "semmit", "sehol", "senki",
    "semmi", "semmilyen", "egyáltalán", "korántsem", "távolról",
    "sehogy", "semmiképpen", "semmiféle",
];
