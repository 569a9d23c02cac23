//! Sample Texts
//!
//! Quick-fill presets so a user can try the service without typing.

/// A named preset text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleText {
    /// Short lookup key
    pub key: &'static str,
    /// Button title
    pub title: &'static str,
    /// The text itself
    pub text: &'static str,
}

/// Built-in presets
pub const SAMPLE_TEXTS: &[SampleText] = &[
    SampleText {
        key: "news",
        title: "News Article",
        text: "Scientists have made a groundbreaking discovery in renewable energy technology. \
A new type of solar panel has been developed that can generate electricity even in low-light \
conditions, potentially revolutionizing how we harness solar power. The research team, led by \
Dr. Sarah Johnson at MIT, spent five years developing this innovative technology. The new \
panels use a special coating that can capture and convert infrared light into electricity, \
making them 40% more efficient than traditional solar panels. This breakthrough could \
significantly reduce our dependence on fossil fuels and help combat climate change. The \
technology is expected to be commercially available within the next three years, with major \
energy companies already expressing interest in licensing the technology.",
    },
    SampleText {
        key: "sports",
        title: "Sports News",
        text: "In a thrilling match last night, the home team secured a dramatic victory in the \
final minutes of the game. The crowd erupted in celebration as the winning goal was scored with \
just 30 seconds left on the clock. This victory puts the team at the top of the league standings \
and significantly improves their chances of making it to the playoffs. The star player, who \
scored the winning goal, dedicated the victory to the fans who have supported the team \
throughout this challenging season. The coach praised the team's determination and resilience, \
noting that this win demonstrates their championship potential.",
    },
];

/// Find a preset by key or title (case-insensitive)
#[must_use]
pub fn find_sample(name: &str) -> Option<&'static SampleText> {
    let name = name.trim();
    SAMPLE_TEXTS
        .iter()
        .find(|s| s.key.eq_ignore_ascii_case(name) || s.title.eq_ignore_ascii_case(name))
}
