//! Episode post value object

use chrono::NaiveDateTime;

/// Hugo post template for a new episode
const POST_TEMPLATE: &str = include_str!("../../../templates/post.md");

/// Date format expected by the post front matter
pub const POST_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Data rendered into a new episode post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodePost {
    pub number: u32,
    pub date: NaiveDateTime,
}

impl EpisodePost {
    pub fn new(number: u32, date: NaiveDateTime) -> Self {
        Self { number, date }
    }

    /// Post file name, e.g. `podcast-571.md`
    pub fn file_name(&self) -> String {
        format!("podcast-{}.md", self.number)
    }

    /// Render the post template
    pub fn render(&self) -> String {
        POST_TEMPLATE
            .replace("{{number}}", &self.number.to_string())
            .replace("{{date}}", &self.date.format(POST_DATE_FORMAT).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 4, 7)
            .unwrap()
            .and_hms_opt(14, 40, 46)
            .unwrap()
    }

    #[test]
    fn file_name_uses_number() {
        assert_eq!(EpisodePost::new(5, fixed_date()).file_name(), "podcast-5.md");
    }

    #[test]
    fn render_matches_expected_post() {
        let expected = r#"+++
title = "UWP - Выпуск 5"
date = "2023-04-07T14:40:46"
categories = ["podcast"]
image = "https://podcast.umputun.com/images/uwp/uwp5.jpg"
filename = "ump_podcast5"
+++

![](https://podcast.umputun.com/images/uwp/uwp5.jpg)

- .
- .
- .
- .
- .
- .
- .
- Вопросы и ответы

[аудио](https://podcast.umputun.com/media/ump_podcast5.mp3)
<audio src="https://podcast.umputun.com/media/ump_podcast5.mp3" preload="none"></audio>

"#;
        assert_eq!(EpisodePost::new(5, fixed_date()).render(), expected);
    }

    #[test]
    fn render_substitutes_every_number() {
        let text = EpisodePost::new(571, fixed_date()).render();
        assert!(text.contains("title = \"UWP - Выпуск 571\""));
        assert!(text.contains("filename = \"ump_podcast571\""));
        assert_eq!(text.matches("images/uwp/uwp571.jpg").count(), 2);
        assert!(text.contains("[аудио](https://podcast.umputun.com/media/ump_podcast571.mp3)"));
        assert!(text.contains("<audio src=\"https://podcast.umputun.com/media/ump_podcast571.mp3\""));
        assert_eq!(text.matches("571").count(), 6);
        assert!(!text.contains("{{"));
    }
}
