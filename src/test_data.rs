/// A post that was never published: no publishedUrl yet.
#[cfg(test)]
pub const POST_NEW: &str = r##"---
title: Hello
tags:
  - Hello World!
  - cli
---

# Hello

This is the body.

It has more than one paragraph.
"##;

/// A post that already carries the URL the platform assigned to it.
#[cfg(test)]
pub const POST_PUBLISHED: &str = r##"---
title: Returning
subtitle: A returning post
tags:
  - rust
canonicalUrl: https://original.example.com/returning
publishedUrl: https://blog.example.com/returning-cm1x9a0b2000108l4hyp2e5gq
---

# Returning

Body of the returning post.
"##;

/// A published post whose stored URL does not contain a recognizable post id.
#[cfg(test)]
pub const POST_PUBLISHED_BAD_URL: &str = r##"---
title: Odd URL
tags:
  - rust
publishedUrl: https://blog.example.com/odd-url
---

Body of the odd post.
"##;

/// Front matter that fails validation: no title and tags is not a list.
#[cfg(test)]
pub const POST_INVALID: &str = r##"---
tags: rust
---

Body without a valid header.
"##;
