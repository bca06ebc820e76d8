use crate::command::SubCommand;
use crate::registry::Registry;

/// Completion block for one command: a header comment, the top-level
/// directive offering the token, then one directive per flag scoped to
/// "subcommand seen".
pub fn build_block(program: &str, cmd: &SubCommand) -> String {
    let mut block = format!("# {}\n", cmd.token);
    block.push_str(&format!(
        "complete -c {} -n \"__fish_use_subcommand\" -a {} -d '{}'\n",
        program,
        cmd.token,
        escape(&cmd.short)
    ));
    for (name, usage) in cmd.flags.visit_all() {
        block.push_str(&format!(
            "complete -c {} -n '__fish_seen_subcommand_from {}' -a {} -d '{}'\n",
            program,
            cmd.token,
            name,
            escape(usage)
        ));
    }
    block
}

/// One block per registered command, in registry order.
pub fn build(program: &str, registry: &Registry) -> Vec<String> {
    registry
        .commands()
        .iter()
        .map(|cmd| build_block(program, cmd))
        .collect()
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}
