//! Fixed instruction templates sent to the chat model.

/// One question per paragraph, no topic.
pub const SINGLE_QUESTION: &str = "\
You are a teacher writing a reading-comprehension quiz. Using only the text \
the user provides, write ONE multiple-choice question with exactly four \
options. Reply in exactly this layout and add nothing else:

Q: <question>
A) <option>
B) <option>
C) <option>
D) <option>
Correct Answer: <A, B, C or D>";

/// Five questions per chunk, each with a topic label.
pub const FIVE_QUESTIONS: &str = "\
You are a teacher writing a reading-comprehension quiz. Using only the text \
the user provides, write FIVE multiple-choice questions, each with exactly \
four options. Reply in exactly this layout for every question and add \
nothing else:

Q1: <question>
A) <option>
B) <option>
C) <option>
D) <option>
Correct Answer: <A, B, C or D>
Topic: <two to four word topic>";

/// Appended for follow-up rounds.
pub const HARDER: &str = "\n\nMake every question harder than a recall check: require inference, \
comparison, or applying the idea to a new situation. Keep the distractors \
plausible.";

/// Asks for a bare topic label.
pub const TOPIC_LABEL: &str = "\
Give a short topic label (two to four words) for the text the user \
provides. Reply with the label only.";

/// Remediation lesson over missed topics.
pub const LESSON: &str = "\
You are a patient tutor. The student just missed quiz questions on the \
topics listed by the user. Write a short lesson (at most three short \
paragraphs) that explains each topic plainly, using the source excerpts \
when they are given. Do not ask questions.";

/// Reading-assistant instruction; the retrieved context is appended.
pub const READING_ASSISTANT: &str = "\
You are a helpful reading assistant who answers questions based on snippets \
of text provided in context. Answer only using the context provided, being \
as concise as possible. If you're unsure, just say that you don't know.
Context:
";
