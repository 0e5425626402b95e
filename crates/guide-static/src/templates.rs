//! Template engine and the homepage layout host.

use minijinja::{context, Environment};

use guide_components::{
    LayoutError, LayoutHost, LayoutProps, NavbarStart, NavbarStartProps, Slots,
};

/// Site-wide chrome shared by every page the layout renders.
#[derive(Debug, Clone)]
pub struct SiteChrome {
    /// Brand text in the navbar
    pub site_title: String,
    /// Stylesheet URLs loaded before the site stylesheet
    pub styles: Vec<String>,
    /// Footer text
    pub footer: String,
    /// Props passed to the navbar start component
    pub navbar: NavbarStartProps,
    /// Raw HTML appended to `<head>` (dev server reload script)
    pub head_extra: Vec<String>,
}

impl Default for SiteChrome {
    fn default() -> Self {
        Self {
            site_title: guide_components::PAGE_TITLE.to_string(),
            styles: vec![
                "https://cdn.jsdelivr.net/npm/bulma@0.9.4/css/bulma.min.css".to_string(),
                "https://use.fontawesome.com/releases/v5.15.4/css/all.css".to_string(),
            ],
            footer: "IntelliJ IDEA Guide. Content is community-driven.".to_string(),
            navbar: NavbarStartProps::default(),
            head_extra: vec![],
        }
    }
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a template engine with the built-in templates.
    pub fn new() -> Result<Self, LayoutError> {
        let mut env = Environment::new();

        for (name, source) in [
            ("base.html", BASE_TEMPLATE),
            ("homepage.html", HOMEPAGE_TEMPLATE),
        ] {
            env.add_template(name, source)
                .map_err(|e| LayoutError::Template(e.to_string()))?;
        }

        Ok(Self { env })
    }

    /// Render a page shell with pre-rendered navbar and slot HTML.
    pub fn render_page(
        &self,
        template: &str,
        chrome: &SiteChrome,
        props: &LayoutProps,
        navbar_start: &str,
        hero: &str,
        main: &str,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => &props.title,
            card => &props.twitter_card_page,
            site_title => &chrome.site_title,
            styles => &chrome.styles,
            footer => &chrome.footer,
            head_extra => &chrome.head_extra,
            navbar_start => navbar_start,
            hero => hero,
            main => main,
        })
    }
}

/// Layout host for full-width landing pages: a hero band above the main
/// section, with the site navbar and footer around them.
pub struct HomepageLayout {
    engine: TemplateEngine,
    chrome: SiteChrome,
}

impl HomepageLayout {
    /// Create the layout with the given chrome.
    pub fn new(chrome: SiteChrome) -> Result<Self, LayoutError> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            chrome,
        })
    }
}

impl LayoutHost for HomepageLayout {
    fn name(&self) -> &'static str {
        "homepage"
    }

    fn render(&self, props: &LayoutProps, slots: &Slots) -> Result<String, LayoutError> {
        let navbar_start = NavbarStart::render(&self.chrome.navbar).to_html();

        self.engine
            .render_page(
                "homepage.html",
                &self.chrome,
                props,
                &navbar_start,
                &slots.hero.to_html(),
                &slots.main.to_html(),
            )
            .map_err(|e| LayoutError::Template(e.to_string()))
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }}</title>
  <meta name="description" content="{{ card.description }}">
  <meta name="twitter:card" content="{% if card.image %}summary_large_image{% else %}summary{% endif %}">
  <meta name="twitter:title" content="{{ card.title }}">
  <meta name="twitter:description" content="{{ card.description }}">
  {% if card.image %}<meta name="twitter:image" content="{{ card.image }}">
  {% endif %}{% for style in styles %}<link rel="stylesheet" href="{{ style }}">
  {% endfor %}<link rel="stylesheet" href="/assets/main.css">
  {% for extra in head_extra %}{{ extra | safe }}
  {% endfor %}
</head>
<body>
  <nav class="navbar is-guide" role="navigation" aria-label="main navigation">
    <div class="navbar-brand">
      <a class="navbar-item" href="/"><strong>{{ site_title }}</strong></a>
      <a role="button" class="navbar-burger" aria-label="menu" aria-expanded="false" data-target="guideNavbar">
        <span aria-hidden="true"></span>
        <span aria-hidden="true"></span>
        <span aria-hidden="true"></span>
      </a>
    </div>
    <div id="guideNavbar" class="navbar-menu">
      {{ navbar_start | safe }}
    </div>
  </nav>
  <div class="site-content">
    {% block content %}{% endblock %}
  </div>
  <footer class="footer">
    <div class="content has-text-centered">{{ footer }}</div>
  </footer>
  <script src="/assets/main.js"></script>
</body>
</html>"##;

const HOMEPAGE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
{{ hero | safe }}
{{ main | safe }}
{% endblock %}"##;
