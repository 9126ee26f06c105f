/// Suggest tips relevant to a described task.
///
/// Like every builder here, returns the full user-message text; the server
/// wraps it in a single prompt message. The texts name the tools directly so
/// the client's model knows which ones to reach for.
pub fn tip_suggestion(task_description: &str) -> String {
    format!(
        "I'm working on the following task with GitHub Copilot:\n\
         \n\
         **Task:** {task_description}\n\
         \n\
         Based on this task, please:\n\
         1. Search for relevant tips using the get_tip_by_topic tool\n\
         2. Recommend 2-3 tips that would help me accomplish this task more effectively\n\
         3. Explain how each tip applies to my specific situation\n\
         \n\
         Focus on practical, actionable advice that I can apply immediately."
    )
}

/// Walk through every tip in one category, organized by difficulty.
pub fn category_explorer(category_name: &str) -> String {
    format!(
        "I want to learn about GitHub Copilot tips in the \"{category_name}\" category.\n\
         \n\
         Please:\n\
         1. Use the get_tip_by_topic tool to find all tips in this category\n\
         2. Organize them by difficulty level (beginner, then intermediate, then advanced)\n\
         3. For each tip, provide a brief real-world example of when to use it\n\
         4. Suggest a learning path for mastering this category\n\
         \n\
         Help me understand how these tips build upon each other."
    )
}

/// Build a personalized learning plan from the user's skill level.
pub fn learning_path(current_skill_level: &str) -> String {
    format!(
        "I'm currently at the **{current_skill_level}** level with GitHub Copilot.\n\
         \n\
         Please create a personalized learning path for me:\n\
         1. First, use get_tip_by_topic to find tips matching my skill level\n\
         2. Then find tips at the next level up to help me advance\n\
         3. Recommend which tips to focus on first\n\
         4. Suggest practical exercises to practice each tip\n\
         5. Identify which categories I should prioritize\n\
         \n\
         Create a structured 2-week learning plan with daily goals."
    )
}

/// Question-driven fallback for clients without elicitation support.
///
/// The option bullets sit three spaces deep under their questions. The
/// indent rides at the end of the previous source line, before the
/// continuation backslash, because the backslash swallows the next line's
/// leading whitespace.
pub fn interactive_tip_finder() -> String {
    "Let me help you find the perfect GitHub Copilot tip!\n\
     \n\
     Please answer these questions:\n\
     \n\
     1. **What's your experience level?**\n   \
     - Beginner (just getting started)\n   \
     - Intermediate (comfortable with basics)\n   \
     - Advanced (looking for power-user tips)\n\
     \n\
     2. **What area are you interested in?**\n   \
     - Prompting Techniques (writing better prompts)\n   \
     - IDE Shortcuts (keyboard efficiency)\n   \
     - Code Generation (getting better code output)\n   \
     - Chat Features (using Copilot Chat effectively)\n   \
     - Workspace Context (leveraging project context)\n   \
     - Security & Privacy (safe Copilot usage)\n\
     \n\
     3. **What's your specific goal right now?**\n   \
     (Describe what you're trying to accomplish)\n\
     \n\
     Once you answer, I'll search for the most relevant tips and provide \
     personalized recommendations!"
        .to_string()
}

/// Quiz the user on tip knowledge, optionally scoped to one category.
pub fn quiz_me(category: Option<&str>) -> String {
    let category_text = match category {
        Some(category) => format!(" in the \"{category}\" category"),
        None => String::new(),
    };

    format!(
        "Let's test your GitHub Copilot knowledge{category_text}!\n\
         \n\
         I'll ask you questions about best practices and tips. For each question:\n\
         1. I'll describe a scenario\n\
         2. You tell me which tip or technique would be most helpful\n\
         3. I'll provide feedback and explain the best approach\n\
         \n\
         Ready? Let's start with an easy one!\n\
         \n\
         **Question 1:** You're writing a new function but Copilot's suggestions \
         don't match what you need. What's the FIRST thing you should try?\n\
         \n\
         (Answer, and I'll give you feedback and move to the next question!)"
    )
}
