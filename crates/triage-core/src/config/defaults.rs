//! Built-in triage tables.

use super::{
    CannedResponse, CompoundRule, ConditionCategories, DispatchTables, DurationRules, DurationUnit,
    Greeting, RespiratoryIndicators, SeverityVocabulary,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for SeverityVocabulary {
    fn default() -> Self {
        Self {
            emergency: strings(&[
                "chest pain",
                "shortness of breath",
                "severe bleeding",
                "stroke",
                "heart attack",
            ]),
            urgent: strings(&[
                "high fever",
                "severe pain",
                "persistent vomiting",
                "severe headache",
            ]),
        }
    }
}

impl Default for RespiratoryIndicators {
    fn default() -> Self {
        Self {
            mild: strings(&["cough", "runny nose", "sore throat"]),
            severe: strings(&["shortness of breath", "wheezing", "chest pain"]),
        }
    }
}

impl Default for ConditionCategories {
    fn default() -> Self {
        Self {
            chronic_respiratory: strings(&["COPD", "Asthma"]),
            acute_infections: strings(&["Common Cold", "Flu", "Tonsillitis"]),
            emergency: strings(&["Heart Attack", "Stroke"]),
            max_related: 3,
        }
    }
}

impl Default for DurationRules {
    fn default() -> Self {
        let unit = |unit: &str, stem: &str, threshold: Option<u32>| DurationUnit {
            unit: unit.into(),
            stem: stem.into(),
            threshold,
        };

        // Scan order matters: only the first unit found is evaluated.
        Self {
            units: vec![
                unit("days", "day", Some(14)),
                unit("weeks", "week", Some(2)),
                unit("months", "month", None),
            ],
        }
    }
}

impl Default for CompoundRule {
    fn default() -> Self {
        Self {
            required: strings(&["headache"]),
            any_of: strings(&["3 days", "persistent"]),
            response: concat!(
                "It sounds like you are experiencing a persistent headache. ",
                "For headaches that last more than a few days, here are a few suggestions:\n",
                "- Continue resting in a quiet, dark room\n",
                "- Stay hydrated\n",
                "- Consider trying a cold or warm compress\n",
                "- Over-the-counter medications may help, but you might want to consult with a ",
                "healthcare provider for further evaluation if the pain continues beyond 3 days.\n\n",
                "You may need a more thorough evaluation to rule out other conditions that could ",
                "be causing the headache."
            )
            .to_string(),
        }
    }
}

impl Default for DispatchTables {
    fn default() -> Self {
        Self {
            shortcut_max_words: 4,
            canned: default_canned(),
            greetings: default_greetings(),
            health_keywords: strings(&[
                "pain",
                "hurt",
                "feel",
                "sick",
                "symptoms",
                "treatment",
                "medicine",
                "doctor",
            ]),
            compound: CompoundRule::default(),
            health_concern_reply: concat!(
                "I understand you have a health concern. To provide the best advice, could you please:\n",
                "1. Describe your symptoms in detail\n",
                "2. How long have you been experiencing this?\n",
                "3. Have you tried any remedies?\n\n",
                "Remember, I am an AI assistant and not a substitute for professional medical advice. ",
                "Please consult a healthcare provider for proper diagnosis and treatment."
            )
            .to_string(),
            default_reply: concat!(
                "I am your healthcare assistant. You can ask me about common health issues like headaches, ",
                "fever, colds, or coughs. How can I help you today?"
            )
            .to_string(),
        }
    }
}

fn canned(keyword: &str, steps: &[&str], advice: &str) -> CannedResponse {
    CannedResponse {
        keyword: keyword.into(),
        steps: strings(steps),
        advice: advice.into(),
    }
}

/// Default canned responses, in lookup order.
fn default_canned() -> Vec<CannedResponse> {
    vec![
        canned(
            "headache",
            &[
                "Rest in a quiet, dark room",
                "Stay hydrated",
                "Try over-the-counter pain relievers",
                "Consider applying a cold or warm compress",
            ],
            "If the headache persists for more than 3 days or worsens, consult a healthcare provider.",
        ),
        canned(
            "fever",
            &[
                "Rest and stay hydrated",
                "Take acetaminophen or ibuprofen",
                "Use a light blanket",
                "Take lukewarm baths",
            ],
            "Seek medical attention if fever is high or persists.",
        ),
        canned(
            "cold",
            &[
                "Get plenty of rest",
                "Stay hydrated",
                "Use over-the-counter cold medications",
                "Try honey for sore throat",
                "Use a humidifier",
            ],
            "Consult a doctor if symptoms worsen.",
        ),
        canned(
            "cough",
            &[
                "Stay hydrated",
                "Try honey and warm tea",
                "Use a humidifier",
                "Consider over-the-counter cough medicine",
            ],
            "See a doctor if the cough persists or is severe.",
        ),
        canned(
            "pain",
            &[
                "Rest the affected area",
                "Apply ice or heat",
                "Use over-the-counter pain relievers",
                "Consider gentle stretching or physical therapy",
            ],
            "If the pain is severe or persists, consult a healthcare professional.",
        ),
        canned(
            "hurt",
            &[
                "Assess the injury for swelling or bruising",
                "Rest and avoid strain",
                "Apply ice or compression if needed",
            ],
            "If the pain does not improve or worsens, seek medical advice.",
        ),
        canned(
            "sore throat",
            &[
                "Gargle with warm salt water",
                "Drink warm teas with honey",
                "Use lozenges or throat sprays",
                "Stay hydrated",
            ],
            "If symptoms persist for more than a week, consult a doctor.",
        ),
        canned(
            "flu",
            &[
                "Get plenty of rest",
                "Drink fluids to prevent dehydration",
                "Take over-the-counter flu medicine",
                "Use a humidifier to ease congestion",
            ],
            "Seek medical attention if symptoms become severe.",
        ),
        canned(
            "fatigue",
            &[
                "Ensure you get enough sleep",
                "Stay hydrated and eat a balanced diet",
                "Take breaks and avoid excessive screen time",
                "Consider light physical activity like walking",
            ],
            "Persistent fatigue may require a medical checkup.",
        ),
    ]
}

/// Default greeting and courtesy replies, in lookup order.
fn default_greetings() -> Vec<Greeting> {
    let greeting = |keyword: &str, reply: &str| Greeting {
        keyword: keyword.into(),
        reply: reply.into(),
    };

    vec![
        greeting("hello", "Hello {username}! How can I assist you with your health today?"),
        greeting("hi", "Hi {username}! How can I help you with your health concerns?"),
        greeting(
            "how are you",
            "I am doing well, thank you! How can I assist you with your health today?",
        ),
        greeting("goodbye", "Goodbye! Take care of your health!"),
        greeting("bye", "Bye! Stay healthy!"),
        greeting("thank you", "You are welcome! Let me know if you need any more help."),
        greeting(
            "thanks",
            "You are welcome! Feel free to ask if you need further assistance.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_order() {
        let keywords: Vec<String> = default_canned().into_iter().map(|c| c.keyword).collect();
        assert_eq!(
            keywords,
            strings(&[
                "headache",
                "fever",
                "cold",
                "cough",
                "pain",
                "hurt",
                "sore throat",
                "flu",
                "fatigue"
            ])
        );
    }

    #[test]
    fn test_duration_scan_order() {
        let units: Vec<String> = DurationRules::default().units.into_iter().map(|u| u.unit).collect();
        assert_eq!(units, strings(&["days", "weeks", "months"]));
    }

    #[test]
    fn test_only_named_greetings_are_personalized() {
        let personalized: Vec<String> = default_greetings()
            .into_iter()
            .filter(|g| g.reply.contains("{username}"))
            .map(|g| g.keyword)
            .collect();
        assert_eq!(personalized, strings(&["hello", "hi"]));
    }
}
