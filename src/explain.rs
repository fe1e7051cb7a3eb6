use crate::models::SignalKind;

/// Static copy shown in the signal detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalExplainer {
    pub title: &'static str,
    pub question: &'static str,
    pub methodology: &'static str,
    pub high_means: &'static str,
    pub low_means: &'static str,
}

pub fn explainer(kind: SignalKind) -> SignalExplainer {
    match kind {
        SignalKind::Sentiment => SignalExplainer {
            title: "Sentiment",
            question: "How is the company talking, and how is it being talked about?",
            methodology: "Average polarity of recent company blog posts and Hacker News discussion, \
                          each mapped from [-1, 1] onto [0, 1].",
            high_means: "Upbeat announcements and a warm reception.",
            low_means: "Defensive messaging or a critical community response.",
        },
        SignalKind::Shipping => SignalExplainer {
            title: "Shipping",
            question: "How fast is the company putting things in users' hands?",
            methodology: "Average daily release activity from changelogs over the last 7 entries; \
                          three or more releases a day saturates the score at 1.",
            high_means: "A steady stream of releases and updates.",
            low_means: "A quiet period with few visible launches.",
        },
        SignalKind::Market => SignalExplainer {
            title: "Market",
            question: "What is the market pricing in right now?",
            methodology: "Latest share price against its 30-day average: 20% below maps to 0, \
                          flat to 0.5, 20% above to 1. Private companies have no market signal.",
            high_means: "Price momentum above the recent average.",
            low_means: "Price trading below the recent average.",
        },
        SignalKind::Competitive => SignalExplainer {
            title: "Competitive",
            question: "How does attention and output compare with the field?",
            methodology: "Hacker News points and weekly shipping volume, each relative to the \
                          strongest peer, averaged.",
            high_means: "Leading the conversation and the release cadence.",
            low_means: "Trailing peers on attention or output.",
        },
    }
}
