// Prompt templates for page enrichment. Placeholders use the same `{Name}`
// syntax as the page templates and are filled with `content::fill_template`.

/// Service-area paragraph for a city page.
pub const SERVICE_AREA_PROMPT: &str = "List the top 5 neighborhoods in {City}, {State} and \
    confirm we service zip codes starting with {Area_Code}. Format as a single paragraph \
    describing our network cabling service coverage. Tone: Professional, Contractor-focused.";

/// Token budget for the service-area paragraph.
pub const SERVICE_AREA_MAX_TOKENS: u32 = 150;
