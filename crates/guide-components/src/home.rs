//! Home page composer.

use crate::layout::{LayoutProps, Slots, TwitterCardPage};
use crate::markup::{Element, Fragment};
use crate::page::{Page, PageOutput};

/// Site name shown in the hero heading and social card.
pub const PAGE_TITLE: &str = "IntelliJ IDEA Guide";

/// One-line site summary.
pub const SUBTITLE: &str = "Learning resources for IntelliJ IDEA and related technologies.";

/// Path of the hero background image, written by the asset pipeline.
pub const SPLASH_ASSET: &str = "/assets/intellij-idea-beam.svg";

const HERO_BLURB: &str = "Find out how you can be more productive and write high-quality code \
    faster with a series of tips and tricks, which we have carefully put together for you.";

/// The site home page.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomePage;

impl HomePage {
    /// Metadata handed to the layout host.
    pub fn props() -> LayoutProps {
        LayoutProps {
            title: format!("Home Page - {}", PAGE_TITLE),
            twitter_card_page: TwitterCardPage {
                title: PAGE_TITLE.to_string(),
                description: format!("{} - {}", PAGE_TITLE, SUBTITLE),
                image: String::new(),
            },
        }
    }

    /// Full-width splash section with the site heading.
    pub fn hero() -> Fragment {
        let background = format!(
            "background: url(\"{}\") center center; background-repeat: no-repeat; \
             background-size: cover; color: white",
            SPLASH_ASSET
        );

        Element::new("section")
            .class("hero is-medium")
            .style(background)
            .child(
                Element::new("div").class("hero-body").child(
                    Element::new("div")
                        .class("container")
                        .child(
                            Element::new("h1")
                                .class("title")
                                .style("color: white")
                                .text(PAGE_TITLE),
                        )
                        .child(
                            Element::new("div").class("columns").child(
                                Element::new("div")
                                    .class("column is-two-thirds")
                                    .child(Element::new("p").class("is-size-4").text(HERO_BLURB)),
                            ),
                        ),
                ),
            )
            .into()
    }

    /// Introduction and the two entry-point cards.
    pub fn main() -> Fragment {
        let cards = Element::new("div")
            .class("container")
            .style("margin-top: 2rem")
            .child(
                Element::new("div")
                    .class("columns")
                    .child(card(
                        "/technologies",
                        "Technologies",
                        "Go through handy tips and tricks grouped by language, library, and framework.",
                    ))
                    .child(card(
                        "/topics",
                        "Topics",
                        "Explore a collection of tips organized by topic, such as debugging or code editing.",
                    )),
            );

        Element::new("section")
            .class("section has-background-light")
            .child(
                Element::new("div")
                    .class("container")
                    .child(
                        Element::new("h1")
                            .class("title")
                            .text("Learn Something New Quickly"),
                    )
                    .child(
                        Element::new("div")
                            .child(Element::new("div").class("is-size-5").text(
                                "To start learning, simply jump to the section you find most \
                                 interesting from two broad categories:",
                            ))
                            .child(cards),
                    ),
            )
            .into()
    }
}

/// A column holding one linked card.
fn card(to: &str, heading: &str, description: &str) -> Element {
    Element::new("div").class("column").child(
        Element::new("div").class("card").child(
            Element::new("div")
                .class("card-content")
                .child(
                    Element::new("div").class("media").child(
                        Element::new("div").class("media-content").child(
                            Element::new("a")
                                .href(to)
                                .child(Element::new("h1").class("is-size-4").text(heading)),
                        ),
                    ),
                )
                .child(
                    Element::new("div")
                        .class("content")
                        .child(Element::new("p").class("is-size-5").text(description)),
                ),
        ),
    )
}

impl Page for HomePage {
    fn route(&self) -> &str {
        "/"
    }

    fn render(&self) -> PageOutput {
        PageOutput {
            props: Self::props(),
            slots: Slots {
                hero: Self::hero(),
                main: Self::main(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Slot;
    use crate::markup::Node;
    use pretty_assertions::assert_eq;

    #[test]
    fn produces_metadata_for_layout_host() {
        let output = HomePage.render();

        assert_eq!(output.props.title, "Home Page - IntelliJ IDEA Guide");
        assert_eq!(output.props.twitter_card_page.title, "IntelliJ IDEA Guide");
        assert_eq!(
            output.props.twitter_card_page.description,
            "IntelliJ IDEA Guide - Learning resources for IntelliJ IDEA and related technologies."
        );
        assert!(output.props.twitter_card_page.image.is_empty());
    }

    #[test]
    fn fills_exactly_hero_and_main() {
        let output = HomePage.render();

        let filled: Vec<_> = output
            .slots
            .iter()
            .filter(|(_, fragment)| !fragment.nodes().is_empty())
            .map(|(slot, _)| slot)
            .collect();

        assert_eq!(filled, vec![Slot::Hero, Slot::Main]);
    }

    #[test]
    fn hero_has_single_unlinked_heading() {
        let hero = HomePage::hero();

        let headings: Vec<_> = ["h1", "h2", "h3"]
            .iter()
            .flat_map(|tag| hero.find_all(tag))
            .collect();

        assert_eq!(headings.len(), 1);
        assert_eq!(
            Node::from(headings[0].clone()).text_content(),
            "IntelliJ IDEA Guide"
        );
        assert!(hero.links().is_empty());
    }

    #[test]
    fn hero_references_splash_background() {
        let html = HomePage::hero().to_html();

        assert!(html.contains("url(&quot;/assets/intellij-idea-beam.svg&quot;) center center"));
        assert!(html.contains("background-size: cover"));
    }

    #[test]
    fn main_has_two_cards_linking_to_sections() {
        let main = HomePage::main();

        let cards = main.find_by_class("card");
        assert_eq!(cards.len(), 2);

        let targets: Vec<Vec<String>> = cards
            .iter()
            .map(|card| {
                let node = Node::from((*card).clone());
                node.links().into_iter().map(str::to_string).collect()
            })
            .collect();

        assert_eq!(
            targets,
            vec![vec!["/technologies".to_string()], vec!["/topics".to_string()]]
        );
        assert_eq!(main.links(), vec!["/technologies", "/topics"]);
    }

    #[test]
    fn renders_identically_every_time() {
        let first = HomePage.render();
        let second = HomePage.render();

        assert_eq!(first, second);
        assert_eq!(first.slots.hero.to_html(), second.slots.hero.to_html());
        assert_eq!(first.slots.main.to_html(), second.slots.main.to_html());
    }
}
