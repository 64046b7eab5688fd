use super::util::clamp01;
use fnv::FnvHashMap;
use rand::rngs::StdRng;
use rand::Rng;
use serde_json::Value;
use std::fs::File;
use std::io;
use std::io::BufReader;

// One survey respondent: item scores keyed however the source
// spreadsheet happened to name them. Records may be partial or
// empty; every missing item has a default draw (see Profile).
#[derive(Debug, Clone, Default)]
pub struct RespondentRecord {
    pub respondent_id: Option<u64>,
    pub values: FnvHashMap<String, f64>,
}

impl RespondentRecord {
    pub fn get(&self, aliases: &[&str]) -> Option<f64> {
        aliases.iter().filter_map(|k| self.values.get(*k)).next().copied()
    }
}

// How a raw survey item maps into model range.
#[derive(Debug, Clone, Copy)]
pub enum Scale {
    // Hours per day, 0-7, normalized by /7
    Hours,
    // 1-5 Likert item, normalized by /5
    Likert,
    // Negative-polarity 1-5 Likert item, normalized as (5 - raw)/5
    LikertReversed,
}

// A 0-1 trait or belief score.
pub struct ScoreField {
    pub aliases: [&'static str; 2],
    pub scale: Scale,
}

impl ScoreField {
    pub fn resolve(&self, record: Option<&RespondentRecord>, rng: &mut StdRng) -> f32 {
        let raw = record.and_then(|r| r.get(&self.aliases)).map(|v| v as f32);
        match self.scale {
            Scale::Hours => {
                let v = raw.unwrap_or_else(|| rng.gen::<f32>() * 7.);
                clamp01(v / 7.)
            }
            Scale::Likert => {
                let v = raw.unwrap_or_else(|| rng.gen::<f32>() * 5.);
                clamp01(v / 5.)
            }
            Scale::LikertReversed => {
                let v = raw.unwrap_or_else(|| rng.gen::<f32>() * 5.);
                clamp01((5. - v) / 5.)
            }
        }
    }
}

// A categorical demographic code, 1..=cardinality.
pub struct CodeField {
    pub aliases: [&'static str; 2],
    pub cardinality: u8,
}

impl CodeField {
    pub fn resolve(&self, record: Option<&RespondentRecord>, rng: &mut StdRng) -> u8 {
        match record.and_then(|r| r.get(&self.aliases)) {
            Some(v) => (v.round() as i64).max(1).min(self.cardinality as i64) as u8,
            None => rng.gen_range(1, self.cardinality + 1),
        }
    }
}

// Canonical fields and the survey keys they answer to. Exported
// spreadsheets use both the underscore and the dot spelling.
static SOCIAL_MEDIA_TIME: ScoreField = ScoreField { aliases: ["Q1_1", "Q1.1"], scale: Scale::Hours };
static SOURCE_CHECKING: ScoreField = ScoreField { aliases: ["Q1_4", "Q1.4"], scale: Scale::Likert };
static MANIPULATION_AWARENESS: ScoreField = ScoreField { aliases: ["Q1_13", "Q1.13"], scale: Scale::Likert };
static SOCIAL_MEDIA_INFLUENCE: ScoreField = ScoreField { aliases: ["Q1_14", "Q1.14"], scale: Scale::Likert };
// Q1.20 asks about confidence with reversed polarity
static INFO_CONFIDENCE: ScoreField = ScoreField { aliases: ["Q1_20", "Q1.20"], scale: Scale::LikertReversed };
static ECHO_CHAMBER_TENDENCY: ScoreField = ScoreField { aliases: ["Q1_21", "Q1.21"], scale: Scale::Likert };
static CRITICAL_THINKING: ScoreField = ScoreField { aliases: ["Q1_24", "Q1.24"], scale: Scale::Likert };

static NARRATIVE_BELIEF: [ScoreField; 10] = [
    ScoreField { aliases: ["Q2_2_01", "Q2.2_01"], scale: Scale::Likert },
    ScoreField { aliases: ["Q2_2_02", "Q2.2_02"], scale: Scale::Likert },
    ScoreField { aliases: ["Q2_2_03", "Q2.2_03"], scale: Scale::Likert },
    ScoreField { aliases: ["Q2_2_04", "Q2.2_04"], scale: Scale::Likert },
    ScoreField { aliases: ["Q2_2_05", "Q2.2_05"], scale: Scale::Likert },
    ScoreField { aliases: ["Q2_2_06", "Q2.2_06"], scale: Scale::Likert },
    ScoreField { aliases: ["Q2_2_07", "Q2.2_07"], scale: Scale::Likert },
    ScoreField { aliases: ["Q2_2_08", "Q2.2_08"], scale: Scale::Likert },
    ScoreField { aliases: ["Q2_2_09", "Q2.2_09"], scale: Scale::Likert },
    ScoreField { aliases: ["Q2_2_10", "Q2.2_10"], scale: Scale::Likert },
];

static AGE_GROUP: CodeField = CodeField { aliases: ["Q3_1", "Q3.1"], cardinality: 6 };
static GENDER: CodeField = CodeField { aliases: ["Q3_2", "Q3.2"], cardinality: 3 };
static EDUCATION: CodeField = CodeField { aliases: ["Q3_3", "Q3.3"], cardinality: 4 };
static MOTHER_TONGUE: CodeField = CodeField { aliases: ["Q3_4", "Q3.4"], cardinality: 7 };
static OCCUPATION: CodeField = CodeField { aliases: ["Q3_5", "Q3.5"], cardinality: 8 };
static INCOME: CodeField = CodeField { aliases: ["Q3_6", "Q3.6"], cardinality: 7 };
static MARITAL_STATUS: CodeField = CodeField { aliases: ["Q3_7", "Q3.7"], cardinality: 3 };
static LOCATION: CodeField = CodeField { aliases: ["Q3_8", "Q3.8"], cardinality: 3 };

// A record resolved against the field table: every canonical
// field present, missing items filled by their default draws.
#[derive(Debug, Clone)]
pub struct Profile {
    pub respondent_id: Option<u64>,
    pub social_media_time: f32,
    pub source_checking: f32,
    pub manipulation_awareness: f32,
    pub social_media_influence: f32,
    pub info_confidence: f32,
    pub echo_chamber_tendency: f32,
    pub critical_thinking: f32,
    pub narrative_belief: Vec<f32>,
    pub age_group: u8,
    pub gender: u8,
    pub education: u8,
    pub mother_tongue: u8,
    pub occupation: u8,
    pub income: u8,
    pub marital_status: u8,
    pub location: u8,
}

impl Profile {
    // Resolution order is fixed so a given seed always spends the
    // same draws on the same fields.
    pub fn resolve(record: Option<&RespondentRecord>, rng: &mut StdRng) -> Profile {
        Profile {
            respondent_id: record.and_then(|r| r.respondent_id),
            social_media_time: SOCIAL_MEDIA_TIME.resolve(record, rng),
            source_checking: SOURCE_CHECKING.resolve(record, rng),
            manipulation_awareness: MANIPULATION_AWARENESS.resolve(record, rng),
            social_media_influence: SOCIAL_MEDIA_INFLUENCE.resolve(record, rng),
            info_confidence: INFO_CONFIDENCE.resolve(record, rng),
            echo_chamber_tendency: ECHO_CHAMBER_TENDENCY.resolve(record, rng),
            critical_thinking: CRITICAL_THINKING.resolve(record, rng),
            narrative_belief: NARRATIVE_BELIEF.iter().map(|f| f.resolve(record, rng)).collect(),
            age_group: AGE_GROUP.resolve(record, rng),
            gender: GENDER.resolve(record, rng),
            education: EDUCATION.resolve(record, rng),
            mother_tongue: MOTHER_TONGUE.resolve(record, rng),
            occupation: OCCUPATION.resolve(record, rng),
            income: INCOME.resolve(record, rng),
            marital_status: MARITAL_STATUS.resolve(record, rng),
            location: LOCATION.resolve(record, rng),
        }
    }
}

// Reads the `{"responses": [...]}` convention produced by the
// external survey parsers.
pub fn load_responses(path: &str) -> io::Result<Vec<RespondentRecord>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let data: Value = serde_json::from_reader(reader)?;
    parse_responses(&data)
}

pub fn parse_responses(data: &Value) -> io::Result<Vec<RespondentRecord>> {
    let responses = match data.get("responses").and_then(|r| r.as_array()) {
        Some(arr) => arr,
        None => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "missing \"responses\" array",
            ))
        }
    };
    Ok(responses.iter().map(record_from_json).collect())
}

// Numeric strings are accepted; anything non-numeric is skipped,
// since missing items are recoverable downstream.
fn record_from_json(obj: &Value) -> RespondentRecord {
    let mut respondent_id = None;
    let mut values = FnvHashMap::default();
    if let Some(map) = obj.as_object() {
        for (k, v) in map {
            let num = match v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.parse::<f64>().ok(),
                _ => None,
            };
            if let Some(num) = num {
                if k == "respondent_id" {
                    respondent_id = Some(num as u64);
                } else {
                    values.insert(k.clone(), num);
                }
            }
        }
    }
    RespondentRecord {
        respondent_id: respondent_id,
        values: values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use serde_json::json;

    fn record(entries: &[(&str, f64)]) -> RespondentRecord {
        let mut values = FnvHashMap::default();
        for (k, v) in entries {
            values.insert(k.to_string(), *v);
        }
        RespondentRecord {
            respondent_id: Some(1),
            values: values,
        }
    }

    #[test]
    fn dot_and_underscore_keys_resolve_identically() {
        let underscore = record(&[("Q1_4", 5.), ("Q3_4", 2.)]);
        let dotted = record(&[("Q1.4", 5.), ("Q3.4", 2.)]);

        // Same seed: the remaining fields draw the same defaults
        let mut rng_a: StdRng = SeedableRng::seed_from_u64(11);
        let mut rng_b: StdRng = SeedableRng::seed_from_u64(11);
        let a = Profile::resolve(Some(&underscore), &mut rng_a);
        let b = Profile::resolve(Some(&dotted), &mut rng_b);

        assert_eq!(a.source_checking, 1.);
        assert_eq!(b.source_checking, 1.);
        assert_eq!(a.mother_tongue, 2);
        assert_eq!(b.mother_tongue, 2);
        assert_eq!(a.critical_thinking, b.critical_thinking);
        assert_eq!(a.narrative_belief, b.narrative_belief);
    }

    #[test]
    fn reversed_polarity_item() {
        let mut rng: StdRng = SeedableRng::seed_from_u64(3);
        let confident = Profile::resolve(Some(&record(&[("Q1_20", 1.)])), &mut rng);
        let skeptical = Profile::resolve(Some(&record(&[("Q1_20", 5.)])), &mut rng);
        assert_eq!(confident.info_confidence, 0.8);
        assert_eq!(skeptical.info_confidence, 0.);
    }

    #[test]
    fn missing_fields_fall_back_in_range() {
        let mut rng: StdRng = SeedableRng::seed_from_u64(5);
        for _ in 0..50 {
            let p = Profile::resolve(None, &mut rng);
            assert!(p.social_media_time >= 0. && p.social_media_time <= 1.);
            assert!(p.critical_thinking >= 0. && p.critical_thinking <= 1.);
            assert!(p.info_confidence >= 0. && p.info_confidence <= 1.);
            for b in &p.narrative_belief {
                assert!(*b >= 0. && *b <= 1.);
            }
            assert!(p.age_group >= 1 && p.age_group <= 6);
            assert!(p.mother_tongue >= 1 && p.mother_tongue <= 7);
            assert!(p.occupation >= 1 && p.occupation <= 8);
            assert!(p.location >= 1 && p.location <= 3);
        }
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut rng: StdRng = SeedableRng::seed_from_u64(7);
        let p = Profile::resolve(Some(&record(&[("Q1_1", 30.), ("Q3_4", 99.), ("Q3_1", 0.)])), &mut rng);
        assert_eq!(p.social_media_time, 1.);
        assert_eq!(p.mother_tongue, 7);
        assert_eq!(p.age_group, 1);
    }

    #[test]
    fn parses_response_documents() {
        let data = json!({
            "responses": [
                {"respondent_id": 12, "Q1_4": 4, "Q1.24": "3", "comment": "n/a"},
                {"Q3_4": 1},
            ]
        });
        let records = parse_responses(&data).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].respondent_id, Some(12));
        assert_eq!(records[0].get(&["Q1_4", "Q1.4"]), Some(4.));
        // Numeric strings count, free text does not
        assert_eq!(records[0].get(&["Q1_24", "Q1.24"]), Some(3.));
        assert_eq!(records[0].values.get("comment"), None);
        assert_eq!(records[1].respondent_id, None);

        assert!(parse_responses(&json!({"rows": []})).is_err());
    }
}
