//! Prompt text for the classifier, task handlers, and memory manager.

use crate::handler::TaskKind;

/// System instructions for the intent classifier.
pub fn classifier_system(summary: &str) -> String {
    format!(
        "You classify user messages for a document assistant into one of four \
         categories:\n\
         - qa: a question about documents or their content\n\
         - summarization: a request to summarize one or more documents\n\
         - calculation: a request involving arithmetic over document amounts\n\
         - unknown: anything that fits none of the above\n\n\
         Report a confidence between 0.0 and 1.0 and any entities the message \
         mentions (document ids, amounts, document types).\n\n\
         Conversation so far:\n{summary}"
    )
}

/// System instructions for a task handler.
pub fn task_system(kind: TaskKind, summary: &str) -> String {
    let role = match kind {
        TaskKind::Qa => {
            "You answer questions about a document collection. Use document_search \
             to find relevant documents and document_reader to inspect one in full. \
             Cite the document ids you relied on."
        }
        TaskKind::Summarization => {
            "You summarize documents from a collection. Use document_search to find \
             the documents to summarize and document_reader to fetch their full \
             content. Produce a concise summary with key points."
        }
        TaskKind::Calculation => {
            "You perform calculations over document amounts. Use document_search to \
             find the relevant amounts, then the calculator tool to compute the \
             result. Always show which documents the numbers came from."
        }
    };
    format!("{role}\n\nConversation so far:\n{summary}")
}

/// Finalize instruction appended after the tool round, per kind.
pub fn finalize_prompt(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::Qa => {
            "Based on the conversation and tool results above, provide your final \
             answer with the document ids it is based on."
        }
        TaskKind::Summarization => {
            "Based on the conversation and tool results above, provide the final \
             summary: the summary text, key points, and the ids of the summarized \
             documents."
        }
        TaskKind::Calculation => {
            "Based on the conversation and tool results above, provide the final \
             calculation: the expression, the numeric result, an explanation, and \
             the source document ids."
        }
    }
}

/// Instruction for compressing a conversation window.
pub fn memory_compression(window: &str) -> String {
    format!(
        "Compress the following conversation into a summary of at most 100 words. \
         Keep document ids, amounts, and unresolved questions; drop pleasantries.\n\n\
         {window}"
    )
}
