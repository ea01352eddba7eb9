//! The predefined component templates the site stamps out repeatedly:
//! project cards, dashboard stat cards and user profile blurbs.
use crate::engine::Engine;
use crate::error::Error;

pub const PROJECT_CARD: &str = r#"
<article class="project-card" data-project-id="{{ id }}">
    <div class="project-image">
        <img src="{{ image }}" alt="{{ title }}" loading="lazy">
        <div class="project-badge {{ category }}">{{ #projectCategory category }}</div>
    </div>
    <div class="project-content">
        <h3>{{ title }}</h3>
        <p>{{ description }}</p>

        <div class="project-stats">
            <div class="stat">
                <i class="fas fa-users"></i>
                <span>{{ stats.beneficiaries }}+ beneficiados</span>
            </div>
            <div class="stat">
                <i class="fas fa-map-marker-alt"></i>
                <span>{{ stats.location }}</span>
            </div>
        </div>

        <div class="project-progress">
            {{ #progressBar progress }}
            <div class="progress-text">
                <span>{{ progress }}% concluído</span>
                <span>{{ #formatCurrency stats.budget }}/{{ #formatCurrency stats.goal }}</span>
            </div>
        </div>

        <div class="project-actions">
            <button class="btn btn-primary" data-action="view-details">
                <i class="fas fa-info-circle"></i>
                Saber Mais
            </button>
            <button class="btn btn-outline" data-action="support-project">
                <i class="fas fa-hand-holding-heart"></i>
                Apoiar
            </button>
        </div>
    </div>
</article>
"#;

pub const STAT_CARD: &str = r#"
<div class="stat-card {{ #if trend }}trend-{{ trend }}{{ /if }}">
    <div class="stat-icon {{ type }}">
        <i class="{{ icon }}"></i>
    </div>
    <div class="stat-info">
        <h3>{{ #formatNumber value }}</h3>
        <p>{{ label }}</p>
    </div>
    {{ #if trend }}
    <div class="stat-trend {{ trend }}">
        <i class="fas fa-arrow-{{ trend }}"></i>
        <span>{{ change }}%</span>
    </div>
    {{ /if }}
</div>
"#;

pub const USER_PROFILE: &str = r#"
<div class="user-profile">
    <div class="user-avatar">
        <img src="{{ avatar }}" alt="{{ name }}">
    </div>
    <div class="user-info">
        <strong>{{ name }}</strong>
        <span>{{ role }} - {{ organization }}</span>
    </div>
    <div class="user-actions">
        <button class="btn btn-outline btn-sm" data-action="edit-profile">
            <i class="fas fa-edit"></i>
        </button>
    </div>
</div>
"#;

/// Install the predefined components into an engine.
pub fn register_defaults(engine: &Engine) -> Result<(), Error> {
    engine.register("project-card", PROJECT_CARD)?;
    engine.register("stat-card", STAT_CARD)?;
    engine.register("user-profile", USER_PROFILE)?;

    Ok(())
}
