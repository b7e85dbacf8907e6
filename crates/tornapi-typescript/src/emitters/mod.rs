pub mod components;
pub mod errors;
pub mod sections;

use minijinja::Environment;

/// Escape `*/` sequences that would prematurely close JSDoc comment blocks.
fn escape_jsdoc(value: String) -> String {
    value.replace("*/", "*\\/")
}

/// Environment holding all emitter templates.
pub(crate) fn template_env() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_filter("escape_jsdoc", escape_jsdoc);
    env.add_template("sections.ts.j2", include_str!("../../templates/sections.ts.j2"))?;
    env.add_template("errors.ts.j2", include_str!("../../templates/errors.ts.j2"))?;
    env.add_template(
        "components.ts.j2",
        include_str!("../../templates/components.ts.j2"),
    )?;
    Ok(env)
}
