use crate::config::SiteConfig;

/// Render the full single-page portfolio document. All markup is produced
/// here; the inline scripts only wire events and talk to `/api/projects`.
pub fn render_home(cfg: &SiteConfig) -> String {
    let skills_html: String = cfg
        .skills
        .iter()
        .map(|s| format!("<li><i class=\"fas fa-check\"></i> {}</li>", html_escape(s)))
        .collect::<Vec<_>>()
        .join("\n                        ");

    let contact_email_html = if cfg.contact_email.is_empty() {
        String::new()
    } else {
        format!(
            "<p class=\"contact-line\"><i class=\"fas fa-envelope\"></i> <a href=\"mailto:{email}\">{email}</a></p>",
            email = html_escape(&cfg.contact_email)
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{site_name} — {tagline}</title>
    <meta name="description" content="{tagline}">
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css">
    <style>
        {css_vars}
        {base_css}
    </style>
</head>
<body>
    <header class="site-header">
        <a href="#home" class="logo">{site_name}</a>
        <nav>
            <a href="#home" class="active">Home</a>
            <a href="#about">About</a>
            <a href="#projects">Projects</a>
            <a href="#contact">Contact</a>
        </nav>
        <button id="themeToggle" aria-label="Toggle theme"><i class="fas fa-moon"></i></button>
    </header>

    <main>
        <section id="home" class="section active">
            <div class="hero">
                <h1>Hi, I'm <span class="accent">{owner}</span></h1>
                <p class="hero-tagline">{tagline}</p>
                <div class="hero-actions">
                    <a href="#projects" class="btn btn-primary">View My Work</a>
                    <a href="#contact" class="btn btn-outline">Get In Touch</a>
                </div>
            </div>
        </section>

        <section id="about" class="section">
            <h2>About</h2>
            <p class="about-bio">{bio}</p>
            <ul class="about-list">
                        {skills}
            </ul>
        </section>

        <section id="projects" class="section">
            <h2>Projects</h2>
            <div class="project-stats-row">
                <div class="stat-box"><span id="totalProjects">–</span><label>Projects</label></div>
                <div class="stat-box"><span id="totalStars">–</span><label>Stars</label></div>
                <div class="stat-box"><span id="pinnedProjects">–</span><label>Pinned</label></div>
            </div>
            <div class="project-filters">
                <button class="filter-btn active" data-filter="all">All</button>
                <button class="filter-btn" data-filter="pinned">Pinned</button>
                <button class="filter-btn" data-filter="web">Web</button>
                <button class="filter-btn" data-filter="python">Python</button>
            </div>
            <div id="projectsGrid" class="projects-grid">{initial_grid}</div>
            <div id="viewAllContainer" class="view-all-container" style="display:none">
                <button id="viewAllBtn" class="view-all-btn">View All Repositories</button>
            </div>
        </section>

        <section id="contact" class="section">
            <h2>Contact</h2>
            {contact_email}
            <form id="contactForm" class="contact-form">
                <input type="text" id="name" placeholder="Name">
                <input type="email" id="email" placeholder="Email">
                <input type="text" id="subject" placeholder="Subject">
                <textarea id="message" placeholder="Message"></textarea>
                <button type="submit" class="btn btn-primary">Send Message</button>
            </form>
        </section>
    </main>

    <button id="scrollToTop" aria-label="Scroll to top"><i class="fas fa-arrow-up"></i></button>

    <footer class="site-footer">
        <p>&copy; {year} {owner}</p>
    </footer>

    <script>{page_js}</script>
    <script>{panel_js}</script>
</body>
</html>"#,
        site_name = html_escape(&cfg.site_name),
        tagline = html_escape(&cfg.tagline),
        owner = html_escape(&cfg.owner),
        bio = html_escape(&cfg.bio),
        skills = skills_html,
        contact_email = contact_email_html,
        css_vars = build_css_variables(cfg),
        base_css = DEFAULT_CSS,
        initial_grid = crate::projects::cards::loading_fragment(),
        year = chrono::Utc::now().format("%Y"),
        page_js = PAGE_JS,
        panel_js = PANEL_JS,
    )
}

/// Build CSS custom properties from site config. Only the accent is
/// configurable; the light/dark palettes are fixed.
fn build_css_variables(cfg: &SiteConfig) -> String {
    // Accent comes from config; reject anything that could close the
    // style block or smuggle in markup.
    let accent = if cfg.accent_color.starts_with('#')
        && cfg.accent_color.len() <= 9
        && cfg.accent_color[1..].chars().all(|c| c.is_ascii_hexdigit())
    {
        cfg.accent_color.as_str()
    } else {
        "#2563eb"
    };

    format!(
        ":root {{ --accent: {accent}; --bg: #ffffff; --bg-alt: #f3f4f6; --text: #111827; --text-secondary: #6b7280; --border: #e5e7eb; }}\n\
         body.dark-mode {{ --bg: #0f172a; --bg-alt: #1e293b; --text: #f1f5f9; --text-secondary: #94a3b8; --border: #334155; }}",
        accent = accent
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const DEFAULT_CSS: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    background: var(--bg);
    color: var(--text);
    line-height: 1.6;
    transition: background 0.3s ease, color 0.3s ease;
}

/* Header */
.site-header {
    position: sticky;
    top: 0;
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 16px 32px;
    background: var(--bg);
    border-bottom: 1px solid var(--border);
    z-index: 100;
}
.logo { font-size: 20px; font-weight: 700; color: var(--text); text-decoration: none; }
.site-header nav a {
    margin: 0 10px;
    color: var(--text-secondary);
    text-decoration: none;
    font-size: 15px;
}
.site-header nav a.active, .site-header nav a:hover { color: var(--accent); }
#themeToggle {
    border: 1px solid var(--border);
    background: transparent;
    color: var(--text);
    width: 36px;
    height: 36px;
    border-radius: 50%;
    cursor: pointer;
}

/* Sections */
.section { display: none; max-width: 1000px; margin: 0 auto; padding: 48px 24px; }
.section.active { display: block; }
.section h2 { font-size: 28px; margin-bottom: 24px; }

/* Hero */
.hero { text-align: center; padding: 80px 0; }
.hero h1 { font-size: 40px; margin-bottom: 12px; }
.hero .accent { color: var(--accent); }
.hero-tagline { font-size: 18px; color: var(--text-secondary); margin-bottom: 32px; }
.hero-actions { display: flex; gap: 12px; justify-content: center; }
.btn {
    display: inline-block;
    padding: 12px 28px;
    border-radius: 8px;
    font-size: 15px;
    font-weight: 600;
    text-decoration: none;
    cursor: pointer;
    border: none;
}
.btn-primary { background: var(--accent); color: #fff; }
.btn-outline { border: 1px solid var(--accent); color: var(--accent); background: transparent; }

/* About */
.about-bio { max-width: 640px; margin-bottom: 24px; color: var(--text-secondary); }
.about-list { list-style: none; }
.about-list li { padding: 6px 0; }
.about-list i { color: var(--accent); margin-right: 8px; }

/* Project stats */
.project-stats-row { display: flex; gap: 16px; margin-bottom: 24px; }
.stat-box {
    flex: 1;
    text-align: center;
    padding: 16px;
    background: var(--bg-alt);
    border-radius: 12px;
}
.stat-box span { display: block; font-size: 26px; font-weight: 700; color: var(--accent); }
.stat-box label { font-size: 13px; color: var(--text-secondary); }

/* Filters */
.project-filters { display: flex; gap: 8px; margin-bottom: 24px; flex-wrap: wrap; }
.filter-btn {
    padding: 8px 18px;
    border-radius: 20px;
    border: 1px solid var(--border);
    background: transparent;
    color: var(--text-secondary);
    font-size: 14px;
    cursor: pointer;
}
.filter-btn.active { background: var(--accent); border-color: var(--accent); color: #fff; }

/* Project cards */
.projects-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(280px, 1fr));
    gap: 20px;
}
.project-card {
    background: var(--bg-alt);
    border: 1px solid var(--border);
    border-radius: 12px;
    overflow: hidden;
    display: flex;
    flex-direction: column;
}
.project-image {
    display: flex;
    align-items: center;
    justify-content: center;
    height: 90px;
    font-size: 34px;
    color: var(--accent);
    background: linear-gradient(135deg, var(--bg-alt), var(--bg));
}
.project-content { padding: 16px; display: flex; flex-direction: column; flex: 1; }
.project-title { display: flex; align-items: center; gap: 8px; font-weight: 700; margin-bottom: 8px; }
.project-title i { color: var(--accent); font-size: 12px; }
.project-description { font-size: 14px; color: var(--text-secondary); margin-bottom: 12px; flex: 1; }
.project-tech { display: flex; gap: 6px; flex-wrap: wrap; margin-bottom: 12px; }
.tech-tag {
    font-size: 11px;
    padding: 3px 10px;
    border-radius: 12px;
    background: var(--bg);
    border: 1px solid var(--border);
    color: var(--text-secondary);
}
.project-footer { display: flex; align-items: center; justify-content: space-between; }
.project-stats { display: flex; gap: 12px; }
.project-stat { display: flex; align-items: center; gap: 4px; font-size: 13px; color: var(--text-secondary); }
.project-link { font-size: 13px; font-weight: 600; color: var(--accent); text-decoration: none; }

/* Empty / fallback state */
.no-projects {
    grid-column: 1 / -1;
    text-align: center;
    padding: 48px 0;
    color: var(--text-secondary);
}
.no-projects i { font-size: 36px; margin-bottom: 12px; }
.view-all-container { text-align: center; margin-top: 24px; }
.view-all-btn {
    display: inline-block;
    padding: 12px 28px;
    border-radius: 8px;
    border: none;
    background: var(--accent);
    color: #fff;
    font-size: 15px;
    font-weight: 600;
    cursor: pointer;
    text-decoration: none;
    margin-top: 1rem;
}
.view-all-btn:disabled { opacity: 0.6; cursor: wait; }

/* Contact */
.contact-line { margin-bottom: 16px; }
.contact-line a { color: var(--accent); }
.contact-form { display: flex; flex-direction: column; gap: 12px; max-width: 520px; }
.contact-form input, .contact-form textarea {
    padding: 12px;
    border: 1px solid var(--border);
    border-radius: 8px;
    background: var(--bg-alt);
    color: var(--text);
    font-family: inherit;
    font-size: 14px;
}
.contact-form textarea { min-height: 120px; resize: vertical; }

/* Scroll to top */
#scrollToTop {
    position: fixed;
    bottom: 24px;
    right: 24px;
    width: 40px;
    height: 40px;
    border-radius: 50%;
    border: none;
    background: var(--accent);
    color: #fff;
    cursor: pointer;
    opacity: 0;
    pointer-events: none;
    transition: opacity 0.3s ease;
}
#scrollToTop.visible { opacity: 1; pointer-events: auto; }

/* Footer */
.site-footer {
    text-align: center;
    padding: 24px;
    border-top: 1px solid var(--border);
    color: var(--text-secondary);
    font-size: 14px;
}

@media (max-width: 700px) {
    .site-header { padding: 12px 16px; }
    .site-header nav a { margin: 0 6px; font-size: 14px; }
    .hero h1 { font-size: 30px; }
    .project-stats-row { flex-direction: column; }
}
"#;

/// Theme, navigation, toasts, contact validation, keyboard shortcuts, and
/// the scroll-to-top button. The contact form never posts anywhere; it
/// only validates and confirms.
const PAGE_JS: &str = r#"
(function(){
var body=document.body;
var navLinks=document.querySelectorAll('.site-header nav a');
var sections=document.querySelectorAll('.section');
var themeToggle=document.getElementById('themeToggle');
var scrollTopBtn=document.getElementById('scrollToTop');
var contactForm=document.getElementById('contactForm');

// Theme: single persisted preference flag
if(localStorage.getItem('theme')==='dark'){body.classList.add('dark-mode');}
if(themeToggle){
    themeToggle.addEventListener('click',function(){
        body.classList.toggle('dark-mode');
        localStorage.setItem('theme',body.classList.contains('dark-mode')?'dark':'light');
    });
}

// Section navigation with hash sync
function navigateTo(id){
    navLinks.forEach(function(l){l.classList.remove('active');});
    var link=document.querySelector('.site-header nav a[href="#'+id+'"]');
    if(link)link.classList.add('active');
    sections.forEach(function(s){s.classList.remove('active');});
    var target=document.getElementById(id);
    if(target)target.classList.add('active');
    history.pushState(null,'','#'+id);
}
window.folioNavigate=navigateTo;
document.querySelectorAll('a[href^="#"]').forEach(function(link){
    link.addEventListener('click',function(e){
        e.preventDefault();
        var id=link.getAttribute('href').substring(1);
        if(id)navigateTo(id);
    });
});
window.addEventListener('popstate',function(){
    navigateTo(window.location.hash.substring(1)||'home');
});
if(window.location.hash){navigateTo(window.location.hash.substring(1));}

// Scroll-to-top with debounce
var scrollTimer;
window.addEventListener('scroll',function(){
    clearTimeout(scrollTimer);
    scrollTimer=setTimeout(function(){
        scrollTopBtn.classList.toggle('visible',window.pageYOffset>300);
    },100);
});
scrollTopBtn.addEventListener('click',function(){
    window.scrollTo({top:0,behavior:'smooth'});
});

// Toast notifications
window.folioToast=function(message,type){
    var colors={success:'#10b981',error:'#ef4444',info:'#2563eb'};
    var toast=document.createElement('div');
    toast.textContent=message;
    toast.style.cssText='position:fixed;top:24px;right:24px;padding:16px 24px;color:#fff;border-radius:12px;z-index:10000;font-size:15px;font-weight:500;max-width:400px;box-shadow:0 10px 15px -3px rgba(0,0,0,0.1);background:'+(colors[type]||colors.info);
    document.body.appendChild(toast);
    setTimeout(function(){toast.remove();},3000);
};

// Contact form: client-side validation only, no backend write
if(contactForm){
    contactForm.addEventListener('submit',function(e){
        e.preventDefault();
        var fields=['name','email','subject','message'].map(function(id){
            var el=document.getElementById(id);
            return el?el.value.trim():'';
        });
        if(fields.some(function(v){return !v;})){
            folioToast('Please fill in all fields','error');
            return;
        }
        folioToast("Message sent successfully! I'll get back to you soon.",'success');
        contactForm.reset();
    });
}

// Keyboard shortcuts: Alt+1..4 jump between sections
document.addEventListener('keydown',function(e){
    if(!e.altKey)return;
    var map={'1':'home','2':'about','3':'projects','4':'contact'};
    if(map[e.key]){e.preventDefault();navigateTo(map[e.key]);}
});
})();
"#;

/// The thin panel adapter: a one-shot visibility trigger, filter buttons,
/// the "view all" action, and counter updates. All state and rendering
/// live on the server; this only swaps fragments in.
const PANEL_JS: &str = r#"
(function(){
var grid=document.getElementById('projectsGrid');
var viewAllContainer=document.getElementById('viewAllContainer');
var viewAllBtn=document.getElementById('viewAllBtn');
var filterBtns=document.querySelectorAll('.filter-btn');
var counters={
    count:document.getElementById('totalProjects'),
    total_stars:document.getElementById('totalStars'),
    pinned_count:document.getElementById('pinnedProjects')
};
var inFlight=false;

function animateCards(){
    var cards=grid.querySelectorAll('.project-card');
    cards.forEach(function(card,i){
        card.style.opacity='0';
        card.style.transform='translateY(20px)';
        card.style.transition='opacity 0.5s ease '+(i*0.05)+'s, transform 0.5s ease '+(i*0.05)+'s';
        requestAnimationFrame(function(){
            card.style.opacity='1';
            card.style.transform='translateY(0)';
        });
    });
}

function apply(view){
    grid.innerHTML=view.html;
    for(var key in counters){
        if(counters[key])counters[key].textContent=view[key];
    }
    viewAllContainer.style.display=view.can_view_all?'block':'none';
    animateCards();
    // A suppressed trigger means another fetch is still in flight; poll
    // once more for its result.
    if(view.state==='loading'){setTimeout(loadPanel,800);}
}

function loadPanel(filter){
    var url='/api/projects'+(filter?'?filter='+encodeURIComponent(filter):'');
    fetch(url)
        .then(function(r){return r.json();})
        .then(apply)
        .catch(function(){
            folioToast('Unable to load projects','error');
        });
}

function loadAll(){
    if(inFlight)return;
    inFlight=true;
    viewAllBtn.disabled=true;
    fetch('/api/projects/all',{method:'POST'})
        .then(function(r){return r.json();})
        .then(apply)
        .catch(function(){
            folioToast('Unable to load all projects','error');
        })
        .finally(function(){
            inFlight=false;
            viewAllBtn.disabled=false;
        });
}

filterBtns.forEach(function(btn){
    btn.addEventListener('click',function(){
        filterBtns.forEach(function(b){b.classList.remove('active');});
        btn.classList.add('active');
        loadPanel(btn.getAttribute('data-filter'));
    });
});

viewAllBtn.addEventListener('click',loadAll);

// One-shot trigger: fetch when the projects panel first scrolls into view
var triggered=false;
var panel=document.getElementById('projects');
var observer=new IntersectionObserver(function(entries){
    entries.forEach(function(entry){
        if(entry.isIntersecting&&!triggered){
            triggered=true;
            loadPanel();
            observer.unobserve(entry.target);
        }
    });
},{threshold:0.1});
observer.observe(panel);
})();
"#;
