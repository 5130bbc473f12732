//! Shared fixtures: a three-tool catalog and one agent conversation in both
//! native and textual form.

#![allow(dead_code)]

use ai_lib_fncall::types::{
    Arguments, ContentBlock, Message, MessageContent, MessageRole, ToolCall, ToolDefinition,
};
use serde_json::json;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that can interact with a computer to solve tasks.\n<IMPORTANT>\n* If user provides a path, you should NOT assume it's relative to the current working directory. Instead, you should explore the file system to find the file before working on it.\n</IMPORTANT>\n\n";

pub const USER_TASK: &str = "<uploaded_files>\n/workspace/astropy__astropy__5.1\n</uploaded_files>\nI've uploaded a python code repository in the directory astropy__astropy__5.1. LONG DESCRIPTION:\n\n";

const EXECUTE_BASH_DESCRIPTION: &str = "Execute a bash command in the terminal.\n* Long running commands: For commands that may run indefinitely, it should be run in the background and the output should be redirected to a file, e.g. command = `python3 app.py > server.log 2>&1 &`.\n* Interactive: If a bash command returns exit code `-1`, this means the process is not yet finished. The assistant must then send a second call to terminal with an empty `command` (which will retrieve any additional logs), or it can send additional text (set `command` to the text) to STDIN of the running process, or it can send command=`ctrl+c` to interrupt the process.\n* Timeout: If a command execution result says \"Command timed out. Sending SIGINT to the process\", the assistant should retry running the command in the background.\n";

const EDITOR_DESCRIPTION: &str = "Custom editing tool for viewing, creating and editing files\n* State is persistent across command calls and discussions with the user\n* If `path` is a file, `view` displays the result of applying `cat -n`. If `path` is a directory, `view` lists non-hidden files and directories up to 2 levels deep\n* The `create` command cannot be used if the specified `path` already exists as a file\n* If a `command` generates a long output, it will be truncated and marked with `<response clipped>`\n* The `undo_edit` command will revert the last edit made to the file at `path`\n\nNotes for using the `str_replace` command:\n* The `old_str` parameter should match EXACTLY one or more consecutive lines from the original file. Be mindful of whitespaces!\n* If the `old_str` parameter is not unique in the file, the replacement will not be performed. Make sure to include enough context in `old_str` to make it unique\n* The `new_str` parameter should contain the edited lines that should replace the `old_str`\n";

pub fn fncall_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::function(
            "execute_bash",
            EXECUTE_BASH_DESCRIPTION,
            Some(json!({
                "type": "object",
                "properties": {
                    "command": {
                        "type": "string",
                        "description": "The bash command to execute. Can be empty to view additional logs when previous exit code is `-1`. Can be `ctrl+c` to interrupt the currently running process."
                    }
                },
                "required": ["command"]
            })),
        ),
        ToolDefinition::function(
            "finish",
            "Finish the interaction when the task is complete OR if the assistant cannot proceed further with the task.",
            None,
        ),
        ToolDefinition::function(
            "str_replace_editor",
            EDITOR_DESCRIPTION,
            Some(json!({
                "type": "object",
                "properties": {
                    "command": {
                        "description": "The commands to run. Allowed options are: `view`, `create`, `str_replace`, `insert`, `undo_edit`.",
                        "enum": ["view", "create", "str_replace", "insert", "undo_edit"],
                        "type": "string"
                    },
                    "path": {
                        "description": "Absolute path to file or directory, e.g. `/repo/file.py` or `/repo`.",
                        "type": "string"
                    },
                    "file_text": {
                        "description": "Required parameter of `create` command, with the content of the file to be created.",
                        "type": "string"
                    },
                    "old_str": {
                        "description": "Required parameter of `str_replace` command containing the string in `path` to replace.",
                        "type": "string"
                    },
                    "new_str": {
                        "description": "Optional parameter of `str_replace` command containing the new string (if not given, no string will be added). Required parameter of `insert` command containing the string to insert.",
                        "type": "string"
                    },
                    "insert_line": {
                        "description": "Required parameter of `insert` command. The `new_str` will be inserted AFTER the line `insert_line` of `path`.",
                        "type": "integer"
                    },
                    "view_range": {
                        "description": "Optional parameter of `view` command when `path` points to a file. If none is given, the full file is shown. If provided, the file will be shown in the indicated line number range, e.g. [11, 12] will show lines 11 and 12. Indexing at 1 to start. Setting `[start_line, -1]` shows all lines from `start_line` to the end of the file.",
                        "items": {"type": "integer"},
                        "type": "array"
                    }
                },
                "required": ["command", "path"]
            })),
        ),
    ]
}

/// Catalog text for [`fncall_tools`], byte for byte.
pub const EXPECTED_CATALOG: &str = r##"---- BEGIN FUNCTION #1: execute_bash ----
Description: Execute a bash command in the terminal.
* Long running commands: For commands that may run indefinitely, it should be run in the background and the output should be redirected to a file, e.g. command = `python3 app.py > server.log 2>&1 &`.
* Interactive: If a bash command returns exit code `-1`, this means the process is not yet finished. The assistant must then send a second call to terminal with an empty `command` (which will retrieve any additional logs), or it can send additional text (set `command` to the text) to STDIN of the running process, or it can send command=`ctrl+c` to interrupt the process.
* Timeout: If a command execution result says "Command timed out. Sending SIGINT to the process", the assistant should retry running the command in the background.

Parameters: {
  "type": "object",
  "properties": {
    "command": {
      "type": "string",
      "description": "The bash command to execute. Can be empty to view additional logs when previous exit code is `-1`. Can be `ctrl+c` to interrupt the currently running process."
    }
  },
  "required": [
    "command"
  ]
}
---- END FUNCTION #1 ----

---- BEGIN FUNCTION #2: finish ----
Description: Finish the interaction when the task is complete OR if the assistant cannot proceed further with the task.
No parameters are required for this function.
---- END FUNCTION #2 ----

---- BEGIN FUNCTION #3: str_replace_editor ----
Description: Custom editing tool for viewing, creating and editing files
* State is persistent across command calls and discussions with the user
* If `path` is a file, `view` displays the result of applying `cat -n`. If `path` is a directory, `view` lists non-hidden files and directories up to 2 levels deep
* The `create` command cannot be used if the specified `path` already exists as a file
* If a `command` generates a long output, it will be truncated and marked with `<response clipped>`
* The `undo_edit` command will revert the last edit made to the file at `path`

Notes for using the `str_replace` command:
* The `old_str` parameter should match EXACTLY one or more consecutive lines from the original file. Be mindful of whitespaces!
* If the `old_str` parameter is not unique in the file, the replacement will not be performed. Make sure to include enough context in `old_str` to make it unique
* The `new_str` parameter should contain the edited lines that should replace the `old_str`

Parameters: {
  "type": "object",
  "properties": {
    "command": {
      "description": "The commands to run. Allowed options are: `view`, `create`, `str_replace`, `insert`, `undo_edit`.",
      "enum": [
        "view",
        "create",
        "str_replace",
        "insert",
        "undo_edit"
      ],
      "type": "string"
    },
    "path": {
      "description": "Absolute path to file or directory, e.g. `/repo/file.py` or `/repo`.",
      "type": "string"
    },
    "file_text": {
      "description": "Required parameter of `create` command, with the content of the file to be created.",
      "type": "string"
    },
    "old_str": {
      "description": "Required parameter of `str_replace` command containing the string in `path` to replace.",
      "type": "string"
    },
    "new_str": {
      "description": "Optional parameter of `str_replace` command containing the new string (if not given, no string will be added). Required parameter of `insert` command containing the string to insert.",
      "type": "string"
    },
    "insert_line": {
      "description": "Required parameter of `insert` command. The `new_str` will be inserted AFTER the line `insert_line` of `path`.",
      "type": "integer"
    },
    "view_range": {
      "description": "Optional parameter of `view` command when `path` points to a file. If none is given, the full file is shown. If provided, the file will be shown in the indicated line number range, e.g. [11, 12] will show lines 11 and 12. Indexing at 1 to start. Setting `[start_line, -1]` shows all lines from `start_line` to the end of the file.",
      "items": {
        "type": "integer"
      },
      "type": "array"
    }
  },
  "required": [
    "command",
    "path"
  ]
}
---- END FUNCTION #3 ----
"##;

/// Everything after the catalog in the augmented system prompt.
pub const EXPECTED_INSTRUCTIONS: &str = r##"

If you choose to call a function ONLY reply in the following format with NO suffix:

<function=example_function_name>
<parameter=example_parameter_1>value_1</parameter>
<parameter=example_parameter_2>
This is the value for the second parameter
that can span
multiple lines
</parameter>
</function>

<IMPORTANT>
Reminder:
- Function calls MUST follow the specified format, start with <function= and end with </function>
- Required parameters MUST be specified
- Only call one function at a time
- You may provide optional reasoning for your function call in natural language BEFORE the function call, but NOT after.
- If there is no function call available, answer the question like normal with your current knowledge and do not tell the user about function calls
"##;

pub fn augmented_system_prompt() -> String {
    format!(
        "{SYSTEM_PROMPT}\nYou have access to the following functions:\n\n{EXPECTED_CATALOG}{EXPECTED_INSTRUCTIONS}"
    )
}

/// A message whose content is a single text block.
pub fn block_message(role: MessageRole, text: &str) -> Message {
    Message::with_content(role, MessageContent::blocks(vec![ContentBlock::text(text)]))
}

pub fn tool_message(call_id: &str, name: &str, text: &str) -> Message {
    Message {
        tool_call_id: Some(call_id.to_string()),
        name: Some(name.to_string()),
        ..block_message(MessageRole::Tool, text)
    }
}

fn cached_system(text: &str) -> Message {
    Message::with_content(
        MessageRole::System,
        MessageContent::blocks(vec![ContentBlock::cached_text(
            text,
            json!({"type": "ephemeral"}),
        )]),
    )
}

const FIRST_PROSE: &str = "I'll help you implement the necessary changes to meet the requirements. Let's follow the steps:\n\n1. First, let's explore the repository structure:";
const SECOND_PROSE: &str = "I see there's a symlink. Let's explore the actual directory:";
const THIRD_PROSE: &str = "Let's look at the source code file mentioned in the PR description:";
const FIRST_OUTPUT: &str = "ls -la /workspace/astropy__astropy__5.1\r\nls: /workspace/astropy__astropy__5.1: Bad file descriptor\r\nlrwxrwxrwx 1 root root 8 Oct 28 21:58 /workspace/astropy__astropy__5.1 -> /testbed[Python Interpreter: /opt/miniconda3/envs/testbed/bin/python]\nroot@openhands-workspace:/workspace/astropy__astropy__5.1 # \n[Command finished with exit code 0]";
const THIRD_OUTPUT: &str = "Here's the result of running `cat -n` on /testbed/astropy/io/fits/card.py:\n     1\t# Licensed under a 3-clause BSD style license - see PYFITS.rst...VERY LONG TEXT";
const RESPONSE_PROSE: &str =
    "Let me search for the `_format_float` method mentioned in the PR description:";

/// The conversation as an agent records it.
pub fn fncall_messages() -> Vec<Message> {
    vec![
        cached_system(SYSTEM_PROMPT),
        block_message(MessageRole::User, USER_TASK),
        block_message(MessageRole::Assistant, FIRST_PROSE).with_tool_calls(vec![ToolCall::new(
            "toolu_01",
            "execute_bash",
            Arguments::new().with("command", "ls -la /workspace/astropy__astropy__5.1"),
        )]),
        tool_message("toolu_01", "execute_bash", FIRST_OUTPUT),
        block_message(MessageRole::Assistant, SECOND_PROSE).with_tool_calls(vec![ToolCall::new(
            "toolu_02",
            "execute_bash",
            Arguments::new().with("command", "ls -la /testbed"),
        )]),
        tool_message("toolu_02", "execute_bash", "SOME OBSERVATION"),
        block_message(MessageRole::Assistant, THIRD_PROSE).with_tool_calls(vec![ToolCall::new(
            "toolu_03",
            "str_replace_editor",
            Arguments::new()
                .with("command", "view")
                .with("path", "/testbed/astropy/io/fits/card.py"),
        )]),
        tool_message("toolu_03", "str_replace_editor", THIRD_OUTPUT),
    ]
}

/// The same conversation as a text-only model sees it.
pub fn non_fncall_messages() -> Vec<Message> {
    vec![
        cached_system(&augmented_system_prompt()),
        block_message(MessageRole::User, USER_TASK),
        block_message(
            MessageRole::Assistant,
            &format!("{FIRST_PROSE}\n\n<function=execute_bash>\n<parameter=command>ls -la /workspace/astropy__astropy__5.1</parameter>\n</function>"),
        ),
        block_message(
            MessageRole::User,
            &format!("EXECUTION RESULT of [execute_bash]:\n{FIRST_OUTPUT}"),
        ),
        block_message(
            MessageRole::Assistant,
            &format!("{SECOND_PROSE}\n\n<function=execute_bash>\n<parameter=command>ls -la /testbed</parameter>\n</function>"),
        ),
        block_message(MessageRole::User, "EXECUTION RESULT of [execute_bash]:\nSOME OBSERVATION"),
        block_message(
            MessageRole::Assistant,
            &format!("{THIRD_PROSE}\n\n<function=str_replace_editor>\n<parameter=command>view</parameter>\n<parameter=path>/testbed/astropy/io/fits/card.py</parameter>\n</function>"),
        ),
        block_message(
            MessageRole::User,
            &format!("EXECUTION RESULT of [str_replace_editor]:\n{THIRD_OUTPUT}"),
        ),
    ]
}

/// A model reply in native form.
pub fn fncall_response_message() -> Message {
    block_message(MessageRole::Assistant, RESPONSE_PROSE).with_tool_calls(vec![ToolCall::new(
        "toolu_04",
        "execute_bash",
        Arguments::new().with(
            "command",
            r#"grep -n "_format_float" /testbed/astropy/io/fits/card.py"#,
        ),
    )])
}

/// The same reply as a text-only model writes it.
pub fn non_fncall_response_message() -> Message {
    block_message(
        MessageRole::Assistant,
        &format!("{RESPONSE_PROSE}\n\n<function=execute_bash>\n<parameter=command>grep -n \"_format_float\" /testbed/astropy/io/fits/card.py</parameter>\n</function>"),
    )
}
