//! Placeholder substitution for command templates
//!
//! Templates reference five variables: `{{url}}`, `{{filename}}`, `{{ip}}`,
//! `{{port}}` and `{{base}}`. Substitution is a single left-to-right pass, so
//! a value that itself contains `{{…}}` is copied verbatim and never expanded.

/// A placeholder recognised in command templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Url,
    Filename,
    Ip,
    Port,
    Base,
}

impl Placeholder {
    pub const ALL: [Placeholder; 5] = [
        Placeholder::Url,
        Placeholder::Filename,
        Placeholder::Ip,
        Placeholder::Port,
        Placeholder::Base,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Placeholder::Url => "{{url}}",
            Placeholder::Filename => "{{filename}}",
            Placeholder::Ip => "{{ip}}",
            Placeholder::Port => "{{port}}",
            Placeholder::Base => "{{base}}",
        }
    }
}

/// Runtime values for one render pass
///
/// Every field defaults to the empty string, which is what an unset
/// variable renders as.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    pub url: String,
    pub filename: String,
    pub ip: String,
    pub port: String,
    pub base: String,
}

impl TemplateVars {
    pub fn get(&self, placeholder: Placeholder) -> &str {
        match placeholder {
            Placeholder::Url => &self.url,
            Placeholder::Filename => &self.filename,
            Placeholder::Ip => &self.ip,
            Placeholder::Port => &self.port,
            Placeholder::Base => &self.base,
        }
    }
}

/// Replace every placeholder token in `template` with its value.
pub fn substitute(template: &str, vars: &TemplateVars) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        match Placeholder::ALL.iter().find(|p| tail.starts_with(p.token())) {
            Some(placeholder) => {
                out.push_str(vars.get(*placeholder));
                rest = &tail[placeholder.token().len()..];
            }
            None => {
                // Step one brace so "{{{url}}" still finds the token at offset 1
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
