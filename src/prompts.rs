//! Prompt skeletons and placeholder rendering.
//!
//! Skeletons are fixed instruction texts with `{UPPER_SNAKE}` placeholders.
//! Rendering is pure string substitution — no I/O, no model calls. Both
//! skeletons explicitly demand minimized single-line JSON output because
//! the downstream parser rejects prose wrapping and pretty-printing.

use std::collections::HashMap;

use regex::Regex;

use crate::error::{Error, Result};

const TEMPLATIZE_SKELETON: &str = r#"You are GPT-Template, a program that turns LinkedIn Posts into perfectly usable templates. A template is a piece of content with the right formatting & post structure, with bracket like "[]" filled with the best indication for the writer to make it its own piece of text. Here is an example. The original LinkedIn post between '':
'The 9 to 5 is getting pummeled.
The great resignation is growing faster than ever.
And I love it.
Why?
Because the workforce is tired...'
The template GPT-Template should provide between '':'The [issue/topic] is [massive change]
The [trend] is [intensifying].
And I [strong emotion] it.
Why?
Because [target audience] are [strong negative emotion].'
Here's another LinkedIn post example between '': 'I quit my job.
It was the biggest salary I ever made in my life.
My personal income went to $0.
I threw away 66% of my belongings.'
Here's what GPT-Template should answer between '':'I [significant decision or action].
It was the [notable achievement] in my [context].
My [personal consequence or change].
I [action taken] of my [possessions or attachments].'.
Now, I will give you a LinkedIn post. I want you to generate only the reusable template. The template should be generic and used on any topic. The template should use the same formatting, that means the same spaces and enters. I want it to look less like of a post but more like a template anyone could use. The output should have the following dictionary format in minimized form (no spaces, ideally one line): {"title": "Short title of template", "post": "The template you made"} Please do your best, this is important to my career. I'm going to tip you $200 for a perfect response.
This is the LinkedIn post: '{LINKEDIN_POST}'."#;

const GENERATE_POSTS_SKELETON: &str = r#"You are a viral Content creator. You will take a template and a topic, and generate posts from it. Here is the template between '':
'{TEMPLATE}'
Based on this template, generate {NUMBER_OF_POSTS} different posts where you will only fill in the brackets. The posts should be around the topics {TOPICS}.
Please use the following output format where you will output a list of dictionaries in minimized form (no spaces, ideally one line): [{"title": "Short Title of the post", "post": "The post you made"}, {"title": "Another short title", "post": "Another post you made"}] Please do your best, this is important to my career. I'm going to tip you $200 for a perfect response."#;

/// The named prompt skeletons the pipeline can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skeleton {
    /// Turn one sample post into a reusable template. Placeholder:
    /// `{LINKEDIN_POST}`. Expected model output: one JSON object.
    Templatize,
    /// Fill a template for a topic list. Placeholders: `{TEMPLATE}`,
    /// `{NUMBER_OF_POSTS}`, `{TOPICS}`. Expected output: a JSON array.
    GeneratePosts,
}

impl Skeleton {
    pub fn name(self) -> &'static str {
        match self {
            Skeleton::Templatize => "templatize",
            Skeleton::GeneratePosts => "generate_posts",
        }
    }

    fn text(self) -> &'static str {
        match self {
            Skeleton::Templatize => TEMPLATIZE_SKELETON,
            Skeleton::GeneratePosts => GENERATE_POSTS_SKELETON,
        }
    }
}

pub struct PromptBuilder;

impl PromptBuilder {
    /// Render `skeleton`, substituting every `{UPPER_SNAKE}` placeholder
    /// from `bindings`. An unbound placeholder fails the whole render.
    ///
    /// Only uppercase tokens are placeholders, so the JSON examples inside
    /// the skeleton texts pass through untouched. Substituted values are
    /// not rescanned.
    pub fn render(skeleton: Skeleton, bindings: &HashMap<&str, String>) -> Result<String> {
        let placeholder = Regex::new(r"\{([A-Z][A-Z0-9_]*)\}").expect("placeholder pattern");
        let text = skeleton.text();

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in placeholder.captures_iter(text) {
            let token = caps.get(0).expect("whole match");
            let key = &caps[1];
            let value = bindings.get(key).ok_or_else(|| Error::MissingBinding {
                skeleton: skeleton.name(),
                placeholder: key.to_string(),
            })?;
            out.push_str(&text[last..token.start()]);
            out.push_str(value);
            last = token.end();
        }
        out.push_str(&text[last..]);
        Ok(out)
    }

    /// Templatize prompt for one raw sample post.
    pub fn templatize(sample_post: &str) -> Result<String> {
        let mut bindings = HashMap::new();
        bindings.insert("LINKEDIN_POST", sample_post.to_string());
        Self::render(Skeleton::Templatize, &bindings)
    }

    /// Post-batch prompt for a stored template, a post count and topics.
    pub fn generate_posts(template: &str, post_count: u32, topics: &str) -> Result<String> {
        let mut bindings = HashMap::new();
        bindings.insert("TEMPLATE", template.to_string());
        bindings.insert("NUMBER_OF_POSTS", post_count.to_string());
        bindings.insert("TOPICS", topics.to_string());
        Self::render(Skeleton::GeneratePosts, &bindings)
    }
}
