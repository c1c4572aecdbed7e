use super::Project;

/// Map a lowercased primary language to a Font Awesome icon class.
/// Unknown languages get the generic code icon, never an error.
fn language_icon(language: &str) -> &'static str {
    match language {
        "python" => "fab fa-python",
        "javascript" => "fab fa-js",
        "java" => "fab fa-java",
        "php" => "fab fa-php",
        "html" => "fab fa-html5",
        "css" => "fab fa-css3-alt",
        "react" => "fab fa-react",
        "vue" => "fab fa-vuejs",
        "django" => "fab fa-python",
        "flask" => "fas fa-flask",
        _ => "fas fa-code",
    }
}

/// True when the needle appears (case-insensitively) in the project's name
/// or description.
fn mentions(project: &Project, needle: &str) -> bool {
    if project.name.to_lowercase().contains(needle) {
        return true;
    }
    project
        .description
        .as_ref()
        .map(|d| d.to_lowercase().contains(needle))
        .unwrap_or(false)
}

/// Build the tech tag row: the primary language tag plus additive keyword
/// tags. The keyword tags are annotations, not replacements: a Python
/// repo that mentions "api" gets both.
fn tech_tags(project: &Project) -> String {
    let mut tags = String::new();

    if let Some(lang) = &project.language {
        tags.push_str(&format!(
            r#"<span class="tech-tag {}">{}</span>"#,
            html_escape(&lang.to_lowercase()),
            html_escape(lang)
        ));
    }

    if mentions(project, "web") {
        tags.push_str(r#"<span class="tech-tag html">HTML/CSS</span>"#);
    }

    if mentions(project, "api") {
        tags.push_str(r#"<span class="tech-tag javascript">API</span>"#);
    }

    tags
}

/// Render one project card. Every remote-sourced string is escaped before
/// it reaches the markup; repository names and descriptions are untrusted
/// input.
pub fn render_card(project: &Project) -> String {
    let language_key = project
        .language
        .as_ref()
        .map(|l| l.to_lowercase())
        .unwrap_or_else(|| "code".to_string());
    let icon = language_icon(&language_key);
    let description = project
        .description
        .as_deref()
        .unwrap_or("No description available.");
    let pin = if project.pinned {
        r#"<i class="fas fa-thumbtack" title="Pinned"></i>"#
    } else {
        ""
    };

    format!(
        r#"<div class="project-card" data-languages="{language_key}" data-pinned="{pinned}">
    <div class="project-image"><i class="{icon}"></i></div>
    <div class="project-content">
        <div class="project-title"><span>{name}</span>{pin}</div>
        <p class="project-description">{description}</p>
        <div class="project-tech">{tags}</div>
        <div class="project-footer">
            <div class="project-stats">
                <div class="project-stat"><i class="fas fa-star"></i><span>{stars}</span></div>
                <div class="project-stat"><i class="fas fa-code-branch"></i><span>{forks}</span></div>
                <div class="project-stat"><i class="fas fa-eye"></i><span>{watchers}</span></div>
            </div>
            <a href="{url}" target="_blank" rel="noopener" class="project-link">View Code <i class="fas fa-arrow-right"></i></a>
        </div>
    </div>
</div>"#,
        language_key = html_escape(&language_key),
        pinned = project.pinned,
        icon = icon,
        name = html_escape(&project.name),
        pin = pin,
        description = html_escape(description),
        tags = tech_tags(project),
        stars = project.stargazers_count,
        forks = project.forks_count,
        watchers = project.watchers_count,
        url = html_escape(&project.html_url),
    )
}

/// Render the full card grid for the current filtered view.
pub fn render_grid(projects: &[Project]) -> String {
    projects.iter().map(render_card).collect::<Vec<_>>().join("\n")
}

/// Placeholder shown while the first fetch is in flight.
pub fn loading_fragment() -> String {
    r#"<div class="no-projects"><i class="fas fa-spinner fa-spin"></i><p>Loading projects...</p></div>"#
        .to_string()
}

/// Explicit empty state. An empty list or an empty filter result renders
/// this, never a blank container.
pub fn empty_fragment(message: &str) -> String {
    format!(
        r#"<div class="no-projects"><i class="fas fa-folder-open"></i><p>{}</p></div>"#,
        html_escape(message)
    )
}

/// Fallback shown when the API cannot be reached, with the profile page as
/// an escape hatch.
pub fn error_fragment(profile_url: &str) -> String {
    format!(
        r#"<div class="no-projects">
    <i class="fas fa-exclamation-triangle"></i>
    <p>Unable to load projects. Please check your internet connection.</p>
    <a href="{}" target="_blank" rel="noopener" class="view-all-btn">View on GitHub</a>
</div>"#,
        html_escape(profile_url)
    )
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
