//! Fixed four-week course template and the placeholders its topics may carry.

use std::fmt;

pub(crate) struct WeekTemplate {
    pub week_number: u8,
    pub title: &'static str,
    pub description: &'static str,
    pub topics: [&'static str; 2],
}

pub(crate) const BASE_SYLLABUS: [WeekTemplate; 4] = [
    WeekTemplate {
        week_number: 1,
        title: "AI Foundations & Neural Nets",
        description: "Understanding the math and code that powers intelligence.",
        topics: [
            "{Day1}: Python for AI & The History of Machine Learning",
            "{Day2}: Neurons, Layers, and Building your first Neural Network in PyTorch",
        ],
    },
    WeekTemplate {
        week_number: 2,
        title: "Computer Vision & NLP Basics",
        description: "How machines see and understand language.",
        topics: [
            "{Day1}: Convolutional Neural Networks (CNNs) & Image Classification",
            "{Day2}: Intro to NLP: Embeddings, RNNs, and the path to Transformers",
        ],
    },
    WeekTemplate {
        week_number: 3,
        title: "The Generative AI Revolution",
        description: "Mastering LLMs and Image Generation models.",
        topics: [
            "{Day1}: Transformers Architecture & Large Language Models (LLMs)",
            "{Day2}: Diffusion Models & Generating Art with Code",
        ],
    },
    WeekTemplate {
        week_number: 4,
        title: "Building Real-World Apps",
        description: "From theory to production-ready applications.",
        topics: [
            "{Day1}: Prompt Engineering & RAG (Retrieval Augmented Generation)",
            "{Day2}: Capstone Project: Building a Chatbot with API Integration",
        ],
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Day1,
    Day2,
}

impl Placeholder {
    pub const ALL: [Placeholder; 2] = [Placeholder::Day1, Placeholder::Day2];

    pub fn token(self) -> &'static str {
        match self {
            Placeholder::Day1 => "{Day1}",
            Placeholder::Day2 => "{Day2}",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Returns the first `{...}` token left in `text`, if any.
pub(crate) fn find_unresolved(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let len = text[start..].find('}')?;
    Some(&text[start..=start + len])
}
