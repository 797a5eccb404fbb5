//! HTML rendering for the todo list page. Plain string building, no template
//! engine; the page is small enough that format! keeps it readable.

use crate::domain::message::{ResultMessageType, ResultMessages};
use crate::domain::todo::Todo;

pub fn todo_list(todos: &[Todo], messages: Option<&ResultMessages>) -> String {
    let mut page = String::with_capacity(1024);
    page.push_str(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\"/>\n<title>Todo List</title>\n</head>\n<body>\n<h1>Todo List</h1>\n",
    );

    if let Some(messages) = messages {
        let class = match messages.message_type {
            ResultMessageType::Success => "alert alert-success",
            ResultMessageType::Error => "alert alert-error",
        };
        page.push_str(&format!("<div id=\"resultMessages\" class=\"{class}\">\n<ul>\n"));
        for message in &messages.list {
            page.push_str(&format!("<li>{}</li>\n", escape(&message.text)));
        }
        page.push_str("</ul>\n</div>\n");
    }

    page.push_str(
        "<form action=\"/todo/create\" method=\"post\">\n\
         <input type=\"text\" name=\"todoTitle\"/>\n\
         <button type=\"submit\">Create Todo</button>\n\
         </form>\n<hr/>\n<ul>\n",
    );

    for todo in todos {
        page.push_str("<li>");
        if todo.finished {
            page.push_str(&format!("<s>{}</s>", escape(&todo.todo_title)));
        } else {
            page.push_str(&escape(&todo.todo_title));
            page.push_str(&format!(
                "\n<form action=\"/todo/finish\" method=\"post\" style=\"display:inline\">\n\
                 <input type=\"hidden\" name=\"todoId\" value=\"{id}\"/>\n\
                 <input type=\"hidden\" name=\"todoTitle\" value=\"{title}\"/>\n\
                 <button type=\"submit\">Finish</button>\n\
                 </form>",
                id = todo.todo_id,
                title = escape(&todo.todo_title),
            ));
        }
        page.push_str(&format!(
            "\n<form action=\"/todo/delete\" method=\"post\" style=\"display:inline\">\n\
             <input type=\"hidden\" name=\"todoId\" value=\"{id}\"/>\n\
             <input type=\"hidden\" name=\"todoTitle\" value=\"{title}\"/>\n\
             <button type=\"submit\">Delete</button>\n\
             </form>",
            id = todo.todo_id,
            title = escape(&todo.todo_title),
        ));
        page.push_str("</li>\n");
    }

    page.push_str("</ul>\n</body>\n</html>\n");
    page
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
