pub const ANALYSIS_SYSTEM: &str = "You are an employer-brand analyst. You assess how a company is perceived \
as an employer by candidates and employees. You answer with a single JSON object and nothing else.";

pub const ANALYSIS: &str = r#"Analyse the employer brand of {{COMPANY_NAME}} ({{COMPANY_URL}}).
{{ROLE_FOCUS}}
<research>
{{RESEARCH_CONTEXT}}
</research>

Score each dimension from 0 to 100 and give a one or two sentence insight grounded in the research
above. Give an industry benchmark score for each dimension. Name up to 5 competitors for talent with
a short reason and a hiring velocity of "high", "medium" or "low".

Respond with ONLY valid JSON matching this shape:
{{SCHEMA}}"#;

pub const SENTIMENT_SYSTEM: &str = "You are a research assistant. You report only figures you can find on \
public review sites and cite them. You never estimate or invent ratings. You answer with a single JSON object.";

pub const SENTIMENT: &str = r#"Find current employee and candidate review data for {{COMPANY_NAME}} ({{COMPANY_URL}})
on Glassdoor, Indeed and similar sites.

Report each site's overall rating (0-5) and review count, category ratings (work-life balance,
compensation, culture, management, career growth), the most common review themes, and interview /
candidate experience data. Omit any site you cannot verify; if nothing can be verified return an
empty "sources" array.

Respond with ONLY valid JSON matching this shape:
{{SCHEMA}}"#;
